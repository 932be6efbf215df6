use std::sync::Arc;

use axum::routing::get;
use axum::Router;

pub mod background;
pub mod config;
pub mod context;
pub mod controllers;

use context::Context;

pub const TITLE: &str = "Random Log Generator";

pub fn app(ctx: Arc<Context>) -> Router {
	Router::new()
		.route("/", get(controllers::root))
		.route("/api/status", get(controllers::get_status))
		.with_state(ctx)
}
