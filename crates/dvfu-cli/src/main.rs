//! dvfu - CLI tool for the DVFU BlackBox and ESA APIs.
//!
//! This is a thin wrapper over the `dvfu-client` library, intended for
//! manual exploration of the mobile app backends.

mod cli;
mod commands;
mod output;
mod settings;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{blackbox, config, esa};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let settings_path = settings::resolve_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Blackbox(cmd) => blackbox::handle(cmd, &settings_path).await,
        Commands::Esa(cmd) => esa::handle(cmd, &settings_path).await,
        Commands::Config(cmd) => config::handle(cmd, &settings_path),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
