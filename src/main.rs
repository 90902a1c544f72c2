use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use enzona_watcher::cli::Cli;
use enzona_watcher::http::ProxySettings;
use enzona_watcher::utils::logging;
use enzona_watcher::utils::shutdown::run_until_interrupted;
use enzona_watcher::{AppConfig, Watcher};

/// 128 + SIGINT
const INTERRUPTED: u8 = 130;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let guard = match logging::init_logging(&config.logging, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = run_until_interrupted(run(&cli, &config), tokio::signal::ctrl_c())
        .await
        .unwrap_or(ExitCode::from(INTERRUPTED));

    // Flush the file writer before the process exits
    drop(guard);
    code
}

async fn run(cli: &Cli, config: &AppConfig) -> ExitCode {
    let query = cli.query();
    let proxy = ProxySettings::from_env();

    let watcher = match Watcher::from_config(config, proxy.as_ref())
        .context("Failed to build HTTP clients")
    {
        Ok(watcher) => watcher,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match watcher.run(&query).await {
        Ok(outcome) => {
            info!("Run finished: {:?}", outcome);
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            error!("Giving up on {}: {}", query.display_name, e);
            ExitCode::from(e.exit_code())
        }
    }
}
