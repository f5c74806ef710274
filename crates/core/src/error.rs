//! Error type for the hookwarden core library.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookwardenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),

    #[error("Invalid settings file: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, HookwardenError>;
