use std::fs::read_to_string;
use std::path::Path;

use rand::Rng;

use crate::error::RandlogError;

pub const LOG_LINES: &[&str] = &[
	"2025-07-22T08:15:30Z INFO    auth_service        - Auth successful for user_id=12345",
	"2025-07-22T08:17:05Z WARNING i_am_a_blocking_Error     Latence élevée détectée (> 2000 ms)",
	"2025-07-22T08:18:42Z ERROR   database_connector   Échec de la connexion : timeout après 10 s",
	"2025-07-22T08:19:12Z INFO    scheduler           - Job cleanup_temp_files started",
	"2025-07-22T08:20:59Z ERROR   stop       Permission refusée lors de l'écriture du fichier /var/data/upload.csv",
	"2025-07-22T08:21:45Z DEBUG   cache_server        Cache hit for key user:profile:12345",
	"2025-07-22T08:22:10Z INFO    api_gateway         Request received: GET /api/v1/users",
	"2025-07-22T08:22:35Z WARNING stop       Rate limit nearing threshold for ip=192.168.1.100",
	"2025-07-22T08:23:00Z ERROR   email_notifier      Failed to send email to user@example.com: SMTP timeout",
	"2025-07-22T08:23:30Z CRITICAL system_monitor   CPU usage critical at 98%",
	"2025-07-22T08:24:05Z INFO    break   Collected 120 metrics",
	"2025-07-22T08:24:40Z ERROR   system_monitor     Transaction failed for order_id=98765: Insufficient funds",
	"2025-07-22T08:25:15Z DEBUG   scheduler  Connection pool size=5",
	"2025-07-22T08:25:50Z WARNING break       Disk space low on /dev/sda1: 5% remaining",
	"2025-07-22T08:26:25Z INFO    scheduler           Scheduled job cleanup_temp_files finished",
];

/// Fixed, non-empty list of log lines. Every entry is a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
	lines: Vec<String>,
}

impl Catalog {
	pub fn new<I, S>(lines: I) -> Result<Self, RandlogError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
		if lines.is_empty() {
			return Err(RandlogError::new("catalog must contain at least one line"));
		}
		if let Some(pos) = lines.iter().position(|l| l.contains(|c: char| c == '\n' || c == '\r')) {
			return Err(RandlogError::new(&format!(
				"catalog entry {} spans more than one line",
				pos
			)));
		}
		Ok(Catalog { lines })
	}

	pub fn builtin() -> Self {
		Catalog {
			lines: LOG_LINES.iter().map(|l| l.to_string()).collect(),
		}
	}

	/// Loads one entry per non-blank line of a UTF-8 text file.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RandlogError> {
		let path = path.as_ref();
		let text = read_to_string(path).map_err(|e| {
			RandlogError::new(&format!("cannot read catalog {}: {}", path.display(), e))
		})?;
		let lines = text
			.lines()
			.map(|l| l.trim_end())
			.filter(|l| !l.is_empty())
			.map(|l| l.to_string());
		Catalog::new(lines)
	}

	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
		&self.lines[rng.random_range(0..self.lines.len())]
	}

	pub fn contains(&self, line: &str) -> bool {
		self.lines.iter().any(|l| l == line)
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.lines.iter().map(String::as_str)
	}
}

impl Default for Catalog {
	fn default() -> Self {
		Catalog::builtin()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;
	use std::collections::HashSet;
	use tempfile::tempdir;

	#[test]
	fn builtin_has_all_lines() {
		let catalog = Catalog::builtin();
		assert_eq!(catalog.len(), 15);
		assert_eq!(catalog.lines()[0], LOG_LINES[0]);
		assert!(catalog.iter().all(|l| !l.contains('\n')));
	}

	#[test]
	fn choose_returns_member() {
		let catalog = Catalog::builtin();
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..1000 {
			let line = catalog.choose(&mut rng);
			assert!(LOG_LINES.contains(&line));
		}
	}

	#[test]
	fn choose_reaches_every_line() {
		let catalog = Catalog::builtin();
		let mut rng = StdRng::seed_from_u64(42);
		let mut seen = HashSet::new();
		for _ in 0..5000 {
			seen.insert(catalog.choose(&mut rng).to_string());
		}
		assert_eq!(seen.len(), catalog.len());
	}

	#[test]
	fn rejects_empty_catalog() {
		let lines: Vec<String> = Vec::new();
		assert!(Catalog::new(lines).is_err());
	}

	#[test]
	fn rejects_multiline_entry() {
		let err = Catalog::new(["ok", "two\nlines"]).unwrap_err();
		assert!(err.to_string().contains("entry 1"));
		assert!(Catalog::new(["carriage\rreturn"]).is_err());
	}

	#[test]
	fn from_file_skips_blank_lines() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("catalog.txt");
		std::fs::write(&path, "first line  \n\n   \nsecond line\n").unwrap();
		let catalog = Catalog::from_file(&path).unwrap();
		assert_eq!(catalog.lines(), &["first line".to_string(), "second line".to_string()]);
		assert!(catalog.contains("second line"));
		assert!(!catalog.contains("third line"));
	}

	#[test]
	fn from_file_missing_or_blank_fails() {
		let dir = tempdir().unwrap();
		assert!(Catalog::from_file(dir.path().join("missing.txt")).is_err());
		let blank = dir.path().join("blank.txt");
		std::fs::write(&blank, "\n \n").unwrap();
		assert!(Catalog::from_file(&blank).is_err());
	}
}
