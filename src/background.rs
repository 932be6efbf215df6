use std::sync::Arc;

use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::SeedableRng;
use randlog::{Catalog, RandomLogWriter, RotatingSink, WriterStats};

use crate::config::Config;

pub fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
	match &config.catalog_path {
		Some(path) => {
			let catalog = Catalog::from_file(path)?;
			log::info!("loaded {} catalog lines from {}", catalog.len(), path.display());
			Ok(catalog)
		}
		None => Ok(Catalog::builtin()),
	}
}

pub fn build_log_writer(config: &Config) -> anyhow::Result<RandomLogWriter<RotatingSink, StdRng>> {
	let catalog = load_catalog(config)?;
	let sink = RotatingSink::open(&config.log_file, config.max_bytes, config.backup_count)
		.with_context(|| format!("cannot open log file {}", config.log_file.display()))?;
	Ok(RandomLogWriter::new(
		Arc::new(catalog),
		Arc::new(sink),
		config.interval,
		StdRng::from_os_rng(),
	))
}

// Starts the detached writer thread. It runs until the process exits.
pub fn start_log_writer(config: &Config) -> anyhow::Result<Arc<WriterStats>> {
	let writer = build_log_writer(config)?;
	let stats = writer.stats();
	writer.spawn().context("cannot spawn log writer thread")?;
	log::info!(
		"writing random log lines to {} (max {} bytes, {} backups)",
		config.log_file.display(),
		config.max_bytes,
		config.backup_count
	);
	Ok(stats)
}
