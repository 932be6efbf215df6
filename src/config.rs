use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use randlog::IntervalRange;

pub const DEFAULT_LOG_FILE: &str = "log.log";
pub const DEFAULT_MAX_BYTES: u64 = 1_000_000;
pub const DEFAULT_BACKUP_COUNT: usize = 3;
pub const DEFAULT_INTERVAL_MIN_MS: u64 = 1000;
pub const DEFAULT_INTERVAL_MAX_MS: u64 = 3000;
pub const DEFAULT_BIND_PORT: u16 = 8000;

pub fn log_file_path() -> PathBuf {
	match std::env::var("LOG_FILE") {
		Ok(val) => Path::new(&val).to_owned(),
		Err(_) => Path::new(DEFAULT_LOG_FILE).to_owned(),
	}
}

pub fn default_bind_addr() -> SocketAddr {
	SocketAddr::from(([0, 0, 0, 0], DEFAULT_BIND_PORT))
}

pub fn catalog_path() -> Option<PathBuf> {
	match std::env::var("CATALOG_PATH") {
		Ok(val) if !val.trim().is_empty() => Some(Path::new(&val).to_owned()),
		_ => None,
	}
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
	T: FromStr,
	T::Err: std::error::Error + Send + Sync + 'static,
{
	match std::env::var(key) {
		Ok(val) => val
			.trim()
			.parse()
			.with_context(|| format!("invalid value for {}: {:?}", key, val)),
		Err(_) => Ok(default),
	}
}

#[derive(Debug, Clone)]
pub struct Config {
	pub log_file: PathBuf,
	pub max_bytes: u64,
	pub backup_count: usize,
	pub interval: IntervalRange,
	pub catalog_path: Option<PathBuf>,
	pub bind_addr: SocketAddr,
}

impl Config {
	pub fn from_env() -> anyhow::Result<Self> {
		let min_ms = env_parse("LOG_INTERVAL_MIN_MS", DEFAULT_INTERVAL_MIN_MS)?;
		let max_ms = env_parse("LOG_INTERVAL_MAX_MS", DEFAULT_INTERVAL_MAX_MS)?;
		let interval = IntervalRange::from_millis(min_ms, max_ms)
			.context("invalid LOG_INTERVAL_MIN_MS/LOG_INTERVAL_MAX_MS")?;
		Ok(Config {
			log_file: log_file_path(),
			max_bytes: env_parse("LOG_MAX_BYTES", DEFAULT_MAX_BYTES)?,
			backup_count: env_parse("LOG_BACKUP_COUNT", DEFAULT_BACKUP_COUNT)?,
			interval,
			catalog_path: catalog_path(),
			bind_addr: env_parse("BIND_ADDR", default_bind_addr())?,
		})
	}
}

impl Default for Config {
	fn default() -> Self {
		Config {
			log_file: PathBuf::from(DEFAULT_LOG_FILE),
			max_bytes: DEFAULT_MAX_BYTES,
			backup_count: DEFAULT_BACKUP_COUNT,
			interval: IntervalRange::default(),
			catalog_path: None,
			bind_addr: default_bind_addr(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;
	use std::time::Duration;

	const KEYS: &[&str] = &[
		"LOG_FILE",
		"LOG_MAX_BYTES",
		"LOG_BACKUP_COUNT",
		"LOG_INTERVAL_MIN_MS",
		"LOG_INTERVAL_MAX_MS",
		"CATALOG_PATH",
		"BIND_ADDR",
	];

	fn clear_env() {
		for key in KEYS {
			std::env::remove_var(key);
		}
	}

	#[test]
	#[serial]
	fn defaults_without_env() {
		clear_env();
		let config = Config::from_env().unwrap();
		assert_eq!(config.log_file, PathBuf::from("log.log"));
		assert_eq!(config.max_bytes, 1_000_000);
		assert_eq!(config.backup_count, 3);
		assert_eq!(config.interval, IntervalRange::default());
		assert!(config.catalog_path.is_none());
		assert_eq!(config.bind_addr, default_bind_addr());
		assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
	}

	#[test]
	#[serial]
	fn reads_overrides() {
		clear_env();
		std::env::set_var("LOG_FILE", "/tmp/fixture/app.log");
		std::env::set_var("LOG_MAX_BYTES", "2048");
		std::env::set_var("LOG_BACKUP_COUNT", "5");
		std::env::set_var("LOG_INTERVAL_MIN_MS", "10");
		std::env::set_var("LOG_INTERVAL_MAX_MS", " 20 ");
		std::env::set_var("CATALOG_PATH", "/tmp/fixture/catalog.txt");
		std::env::set_var("BIND_ADDR", "127.0.0.1:9000");

		let config = Config::from_env().unwrap();
		clear_env();

		assert_eq!(config.log_file, PathBuf::from("/tmp/fixture/app.log"));
		assert_eq!(config.max_bytes, 2048);
		assert_eq!(config.backup_count, 5);
		assert_eq!(config.interval.min(), Duration::from_millis(10));
		assert_eq!(config.interval.max(), Duration::from_millis(20));
		assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/fixture/catalog.txt")));
		assert_eq!(config.bind_addr.port(), 9000);
	}

	#[test]
	#[serial]
	fn rejects_malformed_number() {
		clear_env();
		std::env::set_var("LOG_MAX_BYTES", "lots");
		let err = Config::from_env().unwrap_err();
		clear_env();
		assert!(err.to_string().contains("LOG_MAX_BYTES"));
	}

	#[test]
	#[serial]
	fn rejects_inverted_interval() {
		clear_env();
		std::env::set_var("LOG_INTERVAL_MIN_MS", "5000");
		std::env::set_var("LOG_INTERVAL_MAX_MS", "1000");
		let res = Config::from_env();
		clear_env();
		assert!(res.is_err());
	}

	#[test]
	fn default_config_uses_default_bind_addr() {
		assert_eq!(Config::default().bind_addr, default_bind_addr());
		assert_eq!(default_bind_addr().port(), DEFAULT_BIND_PORT);
	}

	#[test]
	#[serial]
	fn blank_catalog_path_is_ignored() {
		clear_env();
		std::env::set_var("CATALOG_PATH", "  ");
		assert!(catalog_path().is_none());
		clear_env();
	}
}
