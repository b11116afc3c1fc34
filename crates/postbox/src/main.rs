//! `Postbox` - command-line client for the Postbox mail service.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use postbox_core::ClientConfig;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

const DEFAULT_FILTER: &str = "postbox=info,postbox_core=info,postbox_api=info";
const VERBOSE_FILTER: &str = "postbox=debug,postbox_core=debug,postbox_api=debug";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "Command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` wins over
/// `--verbose`.
fn setup_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_configuration(&cli)?;
    let api = config.connect()?;
    debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "Client ready");

    let mut out = std::io::stdout();
    commands::execute(&api, cli.command, &mut out).await
}

/// Defaults, then the config file, then the environment, then flags.
fn load_configuration(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(cli.config.as_deref())?;
    config.apply_env()?;

    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    Ok(config)
}
