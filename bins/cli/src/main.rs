//! Forgeboard operator command line.
//!
//! Prints dashboards as JSON and runs CSV import, export and template
//! generation against the configured database.

mod args;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use forgeboard_shared::config::LogConfig;
use forgeboard_shared::{AppConfig, AppError};

use crate::args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            error!(error = %err, code, "Command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load();

    // Logging starts before a config error is returned.
    let log = config
        .as_ref()
        .map(|c| c.log.clone())
        .unwrap_or_default();
    init_tracing(&log, cli.json_logs);

    let config = config.map_err(AppError::from)?;
    commands::execute(cli.command, &config).await
}

fn init_tracing(log: &LogConfig, force_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if log.json || force_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
