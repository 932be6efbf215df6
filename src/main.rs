use std::sync::Arc;

use anyhow::Context as _;
use randlog_server::background::start_log_writer;
use randlog_server::config::Config;
use randlog_server::context::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	simple_logger::SimpleLogger::new()
		.with_level(log::LevelFilter::Info)
		.env()
		.init()
		.ok();

	let config = Config::from_env()?;
	log::info!("{} starting", randlog_server::TITLE);

	let stats = start_log_writer(&config)?;
	let ctx = Arc::new(Context::new(config, stats));
	let app = randlog_server::app(ctx.clone());

	let listener = tokio::net::TcpListener::bind(ctx.config.bind_addr)
		.await
		.with_context(|| format!("cannot bind {}", ctx.config.bind_addr))?;
	log::info!("listening on {}", ctx.config.bind_addr);
	axum::serve(listener, app).await?;
	Ok(())
}
