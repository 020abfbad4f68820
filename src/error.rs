use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid start url {url:?}: {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("invalid window size {width}x{height}: both sides must be nonzero")]
    InvalidWindowSize { width: u32, height: u32 },

    #[error("invalid allowlist entry {0:?}: expected a bare host name")]
    InvalidAllowlistEntry(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("opening {url} externally: {message}")]
    Opener { url: String, message: String },

    #[error("tauri: {0}")]
    Tauri(#[from] tauri::Error),
}

pub type Result<T> = std::result::Result<T, ShellError>;
