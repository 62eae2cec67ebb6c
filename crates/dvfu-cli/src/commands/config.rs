//! Config subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use dvfu_client::ServiceUrl;

use crate::output;
use crate::settings;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the config file location
    Path,

    /// Print the config with secrets redacted
    Show,

    /// Update config values
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[arg(long)]
    pub login: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// BlackBox bearer token
    #[arg(long)]
    pub blackbox_token: Option<String>,

    /// ESA application code
    #[arg(long)]
    pub esa_app_code: Option<String>,

    #[arg(long)]
    pub blackbox_url: Option<String>,

    #[arg(long)]
    pub esa_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory of .gql query templates
    #[arg(long)]
    pub queries: Option<PathBuf>,
}

pub fn handle(cmd: ConfigCommand, path: &Path) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Path => {
            output::field("Config", &path.display().to_string());
            Ok(())
        }
        ConfigSubcommand::Show => {
            let settings = settings::load(path).context("Failed to load config")?;
            output::json_pretty(&settings.redacted())
        }
        ConfigSubcommand::Set(args) => set(args, path),
    }
}

fn set(args: SetArgs, path: &Path) -> Result<()> {
    let mut current = settings::load(path).context("Failed to load config")?;

    if let Some(url) = args.blackbox_url {
        current.blackbox_url = Some(ServiceUrl::new(&url).context("Invalid BlackBox URL")?);
    }
    if let Some(url) = args.esa_url {
        current.esa_url = Some(ServiceUrl::new(&url).context("Invalid ESA URL")?);
    }
    current.login = args.login.or(current.login);
    current.password = args.password.or(current.password);
    current.blackbox_token = args.blackbox_token.or(current.blackbox_token);
    current.esa_app_code = args.esa_app_code.or(current.esa_app_code);
    current.timeout_secs = args.timeout.or(current.timeout_secs);
    current.queries_dir = args.queries.or(current.queries_dir);

    settings::save(path, &current).context("Failed to save config")?;
    output::success("Config saved");
    output::field("Config", &path.display().to_string());

    Ok(())
}
