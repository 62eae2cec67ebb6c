//! Config file holding credentials and service overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use dvfu_core::ServiceUrl;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored defaults for command-line options.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blackbox_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esa_app_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blackbox_url: Option<ServiceUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esa_url: Option<ServiceUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries_dir: Option<PathBuf>,
}

impl Settings {
    /// A copy with every secret replaced by a marker.
    pub fn redacted(&self) -> Self {
        let hide = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]".to_string());
        Self {
            password: hide(&self.password),
            blackbox_token: hide(&self.blackbox_token),
            esa_app_code: hide(&self.esa_app_code),
            ..self.clone()
        }
    }
}

/// Use the explicit path if given, else the platform config directory.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let dirs = ProjectDirs::from("ru", "dvfu", "dvfu")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.json"))
}

/// Load settings. A missing file yields empty settings.
pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let json = fs::read_to_string(path).context("Failed to read config file")?;
    serde_json::from_str(&json).context("Invalid config file")
}

/// Save settings, readable only by the owner on Unix.
pub fn save(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, &json).context("Failed to write config file")?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}
