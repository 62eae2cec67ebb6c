//! ESA subcommand implementations.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use dvfu_client::{AppCode, ClientConfig, Credentials, EsaSession, ServiceUrl};

use crate::output;
use crate::settings::{self, Settings};

#[derive(Args, Debug)]
pub struct EsaCommand {
    #[command(subcommand)]
    pub command: EsaSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EsaSubcommand {
    /// Request an access token with the password grant
    Token(TokenArgs),
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Account login
    #[arg(long, env = "DVFU_LOGIN")]
    pub login: Option<String>,

    /// Account password
    #[arg(long, env = "DVFU_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Application code sent as Basic authorization
    #[arg(long, env = "DVFU_ESA_APP_CODE", hide_env_values = true)]
    pub app_code: Option<String>,

    /// ESA base URL
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub async fn handle(cmd: EsaCommand, settings_path: &Path) -> Result<()> {
    let settings = settings::load(settings_path).context("Failed to load config")?;

    match cmd.command {
        EsaSubcommand::Token(args) => token(args, &settings).await,
    }
}

async fn token(args: TokenArgs, settings: &Settings) -> Result<()> {
    let login = args
        .login
        .or_else(|| settings.login.clone())
        .context("No login given. Pass --login, set DVFU_LOGIN or run 'dvfu config set --login'.")?;
    let password = args
        .password
        .or_else(|| settings.password.clone())
        .context("No password given. Pass --password or set DVFU_PASSWORD.")?;
    let app_code = args
        .app_code
        .or_else(|| settings.esa_app_code.clone())
        .context("No app code given. Pass --app-code or set DVFU_ESA_APP_CODE.")?;

    let base_url = match &args.url {
        Some(url) => ServiceUrl::new(url).context("Invalid ESA URL")?,
        None => settings
            .esa_url
            .clone()
            .unwrap_or_else(|| ClientConfig::esa().base_url),
    };

    let mut config = ClientConfig::new(base_url);
    if let Some(secs) = args.timeout.or(settings.timeout_secs) {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let session = EsaSession::login(config, Credentials::new(login, password), AppCode::new(app_code))
        .await
        .context("Failed to create ESA session")?;

    let Some(token) = session.token_info() else {
        output::error("ESA did not issue a token");
        bail!("ESA token request failed (rerun with -v for details)");
    };

    output::success("Token issued");
    output::field("Login", session.login_name());
    output::field("Access token", token.access_token.as_str());
    if let Some(token_type) = &token.token_type {
        output::field("Type", token_type);
    }
    if let Some(expires_in) = token.expires_in {
        output::field("Expires in", &format!("{}s", expires_in.as_secs()));
    }

    Ok(())
}
