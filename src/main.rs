mod app;
mod catalog;
mod cli;
mod config;
mod dashboard;
mod logging;
mod metrics;
mod modal;
mod navigation;
mod schedule;
mod tui;

use anyhow::Result;
use app::{App, RunOptions};
use clap::Parser;
use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config_path.as_deref())?;
    logging::init_logging(&config.logging.file)?;
    tracing::info!(log_file = %config.logging.file.display(), "control center starting");

    let options = RunOptions {
        section: cli.section,
        tab: cli.tab,
        seed: cli.seed,
    };
    App::new(config).await?.run(options).await
}
