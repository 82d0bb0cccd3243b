mod cli;
mod commands;
mod config;
mod errors;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Command};
use client::ApiClient;
use config::{Config, LoggingConfig};
use errors::CliError;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` means the command ran but found problems (invalid lines,
/// failed creates).
fn run(cli: Cli) -> Result<bool, CliError> {
    match cli.command {
        Command::Check { file } => {
            let _sentry = logging::init(&LoggingConfig::default());
            commands::check(&file)
        }
        Command::Api(command) => {
            let config = Config::load(&cli.config)?;
            let _sentry = logging::init(&config.logging);
            if let Some(metrics) = &config.metrics {
                logging::init_metrics(metrics)?;
            }

            let client = Arc::new(ApiClient::new(&config.api)?);
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            let result = rt.block_on(commands::dispatch(client, command));
            if let Err(e) = &result {
                tracing::error!(error = %e, "Command failed");
            }
            result
        }
    }
}
