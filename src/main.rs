//! Portfolio API Server
//!
//! Serves the portfolio content API over HTTP until Ctrl+C or SIGTERM.

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use portfolio_api::{api::start_server, core::create_app_state, init_tracing, Config, Error};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("portfolio-api")
        .version(portfolio_api::VERSION)
        .about("REST backend for a personal portfolio site.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("http-addr")
                .long("http-addr")
                .value_name("ADDR")
                .help("HTTP server bind address"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let mut config = Config::load(config_path).context("Failed to load configuration")?;

    // Apply CLI overrides
    apply_cli_overrides(&mut config, &matches)?;
    config.validate()?;

    init_tracing(&config.logging);
    info!("Starting {} v{}", portfolio_api::NAME, portfolio_api::VERSION);

    let state = create_app_state(config).context("Failed to initialize application state")?;
    start_server(state).await.context("HTTP server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Apply command line argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) -> Result<(), Error> {
    if let Some(addr) = matches.get_one::<String>("http-addr") {
        config.server.http_addr = addr
            .parse()
            .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    Ok(())
}
