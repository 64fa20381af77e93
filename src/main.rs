use anyhow::{Context, Result};
use clap::Parser;
use job_recommender::app_log;
use job_recommender::cli::{handle_command, Cli};
use job_recommender::notify::ConsoleNotifier;
use job_recommender::{AppContext, ConfigManager};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load()?;
    config.ensure_directories().await?;

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&config.environment.log_path)
        .with_context(|| {
            format!(
                "Failed to open log file: {}",
                config.environment.log_path.display()
            )
        })?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    app_log!(info, "Starting jobmatch {}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let ctx = AppContext::from_config(&config, Arc::new(ConsoleNotifier)).await?;

    handle_command(cli, &ctx).await
}
