//! BlackBox subcommand implementations.

mod can_feedback;
mod lessons;
mod news_item;
mod register_device;
mod short_token;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::debug;

use dvfu_client::{
    BearerToken, BlackBoxSession, ClientConfig, Credentials, ServiceUrl, TemplateStore,
    bundled_templates,
};

use crate::output;
use crate::settings::{self, Settings};

#[derive(Args, Debug)]
pub struct BlackboxCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: BlackboxSubcommand,
}

/// How to reach and authenticate against BlackBox.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Account login
    #[arg(long, env = "DVFU_LOGIN", global = true)]
    pub login: Option<String>,

    /// Account password
    #[arg(long, env = "DVFU_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Bearer token issued to the mobile app
    #[arg(long, env = "DVFU_BLACKBOX_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// BlackBox base URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Directory of .gql query templates (overrides the bundled ones)
    #[arg(long, global = true)]
    pub queries: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum BlackboxSubcommand {
    /// Fetch the short-lived session token
    ShortToken,

    /// Register a device identifier for push notifications
    RegisterDevice(register_device::RegisterDeviceArgs),

    /// Show the user profile
    Profile,

    /// List news
    News,

    /// Show a single news item
    NewsItem(news_item::NewsItemArgs),

    /// Show the QR pass key
    QrCode,

    /// List lessons for a group within a time range
    Lessons(lessons::LessonsArgs),

    /// Check whether feedback can be left for a lesson
    CanFeedback(can_feedback::CanFeedbackArgs),

    /// List MFC service units
    MfcUnits,

    /// List the user's MFC requests
    UserRequests,
}

pub async fn handle(cmd: BlackboxCommand, settings_path: &Path) -> Result<()> {
    let settings = settings::load(settings_path).context("Failed to load config")?;
    let session = connect(&cmd.connection, &settings)?;
    let compact = cmd.compact;

    match cmd.command {
        BlackboxSubcommand::ShortToken => short_token::run(&session).await,
        BlackboxSubcommand::RegisterDevice(args) => register_device::run(args, &session).await,
        BlackboxSubcommand::Profile => {
            output::data(session.profile().await?, "profile", compact)
        }
        BlackboxSubcommand::News => output::data(session.news().await?, "news", compact),
        BlackboxSubcommand::NewsItem(args) => news_item::run(args, &session, compact).await,
        BlackboxSubcommand::QrCode => output::data(session.qr_code().await?, "QR code", compact),
        BlackboxSubcommand::Lessons(args) => lessons::run(args, &session, compact).await,
        BlackboxSubcommand::CanFeedback(args) => can_feedback::run(args, &session, compact).await,
        BlackboxSubcommand::MfcUnits => output::data(session.mfc_units().await, "MFC units", compact),
        BlackboxSubcommand::UserRequests => {
            output::data(session.user_requests().await, "user requests", compact)
        }
    }
}

/// Build a session from flags, falling back to the config file.
fn connect(args: &ConnectionArgs, settings: &Settings) -> Result<BlackBoxSession> {
    let login = args
        .login
        .clone()
        .or_else(|| settings.login.clone())
        .context("No login given. Pass --login, set DVFU_LOGIN or run 'dvfu config set --login'.")?;
    let password = args
        .password
        .clone()
        .or_else(|| settings.password.clone())
        .context("No password given. Pass --password or set DVFU_PASSWORD.")?;
    let token = args
        .token
        .clone()
        .or_else(|| settings.blackbox_token.clone())
        .context("No BlackBox token given. Pass --token or set DVFU_BLACKBOX_TOKEN.")?;

    let base_url = match &args.url {
        Some(url) => ServiceUrl::new(url).context("Invalid BlackBox URL")?,
        None => settings
            .blackbox_url
            .clone()
            .unwrap_or_else(|| ClientConfig::blackbox().base_url),
    };

    let mut config = ClientConfig::new(base_url);
    if let Some(secs) = args.timeout.or(settings.timeout_secs) {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let templates = match args.queries.as_ref().or(settings.queries_dir.as_ref()) {
        Some(dir) => TemplateStore::load_dir(dir)
            .with_context(|| format!("Failed to load query templates from {}", dir.display()))?,
        None => bundled_templates(),
    };

    debug!(base = %config.base_url, templates = templates.len(), "Connecting to BlackBox");

    BlackBoxSession::with_templates(
        config,
        Credentials::new(login, password),
        BearerToken::new(token),
        templates,
    )
    .context("Failed to create BlackBox session")
}
