use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tauri::{AppHandle, Manager, Runtime};
use url::Url;

use crate::error::{Result, ShellError};
use crate::gate::{Allowlist, NavigationGate, DEFAULT_ALLOWED_HOSTS};

pub const CONFIG_FILE_NAME: &str = "shell.toml";

/// Main window geometry and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ChatGPT".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

/// Shell configuration, read once at startup from `shell.toml` in the app
/// config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// First page loaded into the main window.
    pub start_url: String,
    pub window: WindowConfig,
    /// Domains allowed to load in-app.
    pub allowlist: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_url: "https://chatgpt.com/".to_string(),
            window: WindowConfig::default(),
            allowlist: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl ShellConfig {
    /// Checks entries and the start URL; the start URL must pass the gate.
    pub fn validate(&self) -> Result<()> {
        for entry in &self.allowlist {
            if !is_bare_host(entry) {
                return Err(ShellError::InvalidAllowlistEntry(entry.clone()));
            }
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ShellError::InvalidWindowSize {
                width: self.window.width,
                height: self.window.height,
            });
        }

        let parsed = Url::parse(&self.start_url).map_err(|e| ShellError::InvalidStartUrl {
            url: self.start_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "https" {
            return Err(ShellError::InvalidStartUrl {
                url: self.start_url.clone(),
                reason: "scheme must be https".to_string(),
            });
        }
        if !self.gate().is_allowed_host(&self.start_url) {
            return Err(ShellError::InvalidStartUrl {
                url: self.start_url.clone(),
                reason: "host is not on the allowlist".to_string(),
            });
        }
        Ok(())
    }

    pub fn start_url(&self) -> Result<Url> {
        Url::parse(&self.start_url).map_err(|e| ShellError::InvalidStartUrl {
            url: self.start_url.clone(),
            reason: e.to_string(),
        })
    }

    pub fn gate(&self) -> NavigationGate {
        NavigationGate::new(Allowlist::new(&self.allowlist))
    }
}

/// Domain name only: no scheme, path, port, userinfo or whitespace, and at
/// least two labels. A single label like `com` would allow a whole TLD.
fn is_bare_host(entry: &str) -> bool {
    let labels: Vec<&str> = entry.trim().split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Reads and validates a config file. A missing file yields `Ok(None)`.
pub fn load_from_path(path: &Path) -> Result<Option<ShellConfig>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let cfg: ShellConfig = toml::from_str(&data)?;
    cfg.validate().map_err(|e| ShellError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(cfg))
}

pub fn config_path<R: Runtime>(app: &AppHandle<R>) -> Result<PathBuf> {
    Ok(app.path().app_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the config for this app, falling back to defaults when the file is
/// missing or broken.
pub fn load_or_default<R: Runtime>(app: &AppHandle<R>) -> ShellConfig {
    let path = match config_path(app) {
        Ok(path) => path,
        Err(err) => {
            tracing::warn!(error = %err, "no config dir; using defaults");
            return ShellConfig::default();
        }
    };

    match load_from_path(&path) {
        Ok(Some(cfg)) => {
            tracing::info!("loaded config from {}", path.display());
            cfg
        }
        Ok(None) => ShellConfig::default(),
        Err(err) => {
            tracing::error!(error = %err, "ignoring config at {}", path.display());
            ShellConfig::default()
        }
    }
}
