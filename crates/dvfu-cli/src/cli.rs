//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::blackbox::BlackboxCommand;
use crate::commands::config::ConfigCommand;
use crate::commands::esa::EsaCommand;

/// CLI tool for the DVFU BlackBox and ESA APIs.
#[derive(Parser, Debug)]
#[command(name = "dvfu")]
#[command(author, version = env!("DVFU_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "DVFU_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// BlackBox (schedule, news, profile) operations
    Blackbox(BlackboxCommand),

    /// ESA (OAuth token service) operations
    Esa(EsaCommand),

    /// Inspect or update the config file
    Config(ConfigCommand),
}
