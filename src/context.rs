use std::sync::Arc;

use randlog::WriterStats;

use crate::config::Config;

#[derive(Debug)]
pub struct Context {
	pub config: Config,
	pub stats: Arc<WriterStats>,
}

impl Context {
	pub fn new(config: Config, stats: Arc<WriterStats>) -> Self {
		Context { config, stats }
	}
}
