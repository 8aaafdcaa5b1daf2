pub mod cli;
pub mod commands;
pub mod config;
pub mod extractor; // positional field fallback
pub mod gateway; // remote completion calls
pub mod models;
pub mod report; // merge, layout, PDF, exports
pub mod shell;
pub mod transcript;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, GatewayConfig, OutputPaths};
use crate::gateway::{GatewayError, ModelGateway, OpenAiClient};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot create completion client: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn run() -> Result<(), AppError> {
    let cli = cli::Cli::parse();
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
    }

    let config = GatewayConfig::from_env()?.with_overrides(cli.model, cli.base_url)?;
    tracing::info!(model = %config.model, base_url = %config.base_url, "Completion endpoint configured");

    let gateway = ModelGateway::new(OpenAiClient::new(&config)?);
    let paths = OutputPaths::new(cli.output_dir);

    let mut shell = shell::Shell::new(commands::open_session(), gateway, paths);
    let stdin = std::io::stdin();
    shell.run(stdin.lock(), std::io::stdout())?;
    Ok(())
}
