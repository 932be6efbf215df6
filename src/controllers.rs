use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::context::Context;
use crate::TITLE;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
	title: &'static str,
	log_file: String,
	max_bytes: u64,
	backup_count: usize,
	interval_min_ms: u64,
	interval_max_ms: u64,
	lines_written: u64,
	last_line: Option<String>,
	last_write_at: Option<DateTime<Utc>>,
	started_at: DateTime<Utc>,
}

pub async fn root() -> &'static str {
	TITLE
}

pub async fn get_status(State(ctx): State<Arc<Context>>) -> Json<StatusInfo> {
	let config = &ctx.config;
	Json(StatusInfo {
		title: TITLE,
		log_file: config.log_file.display().to_string(),
		max_bytes: config.max_bytes,
		backup_count: config.backup_count,
		interval_min_ms: config.interval.min().as_millis() as u64,
		interval_max_ms: config.interval.max().as_millis() as u64,
		lines_written: ctx.stats.lines_written(),
		last_line: ctx.stats.last_line(),
		last_write_at: ctx.stats.last_write_at(),
		started_at: ctx.stats.started_at(),
	})
}
