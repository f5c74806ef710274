use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use regex::Regex;
use tracing::{debug, warn};

use crate::env::HOOKWARDEN_CONFIG;
use crate::error::Result;

/// Name of the config file inside the XDG config directory
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub hooks: HooksConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter used when neither RUST_LOG nor HOOKWARDEN_LOG is set
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Hook names that always resolve to a silent allow
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Extensions to the hardcoded credential guard.
/// Config can extend the built-in patterns but never remove them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Additional regexes that mark a hardcoded secret
    #[serde(default)]
    pub extra_patterns: Vec<String>,

    /// Additional filename suffixes exempt from the guard (e.g. ".env.local")
    #[serde(default)]
    pub exempt_suffixes: Vec<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the config for a hook invocation.
    ///
    /// Never fails: a missing file yields defaults, and an unreadable or
    /// invalid file yields defaults plus a warning.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            warn!("Ignoring config: {}", e);
            Self::default()
        })
    }

    /// Load the config file if there is one; a missing file yields defaults
    pub fn try_load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolved config file location.
    ///
    /// 1. HOOKWARDEN_CONFIG env var (tilde-expanded)
    /// 2. XDG config dir (`~/.config/hookwarden/config.toml`)
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(over) = std::env::var(HOOKWARDEN_CONFIG)
            && !over.trim().is_empty()
        {
            return Some(PathBuf::from(shellexpand::tilde(over.trim()).to_string()));
        }

        ProjectDirs::from("dev", "hookwarden", "hookwarden")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Write the commented template to `path` unless a file already exists.
    /// Returns whether a file was written.
    pub fn write_template(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
        Ok(true)
    }

    pub fn is_disabled(&self, hook_name: &str) -> bool {
        self.hooks.disabled.iter().any(|h| h == hook_name)
    }

    /// Compile the configured extra credential patterns, skipping invalid ones
    pub fn extra_credential_patterns(&self) -> Vec<Regex> {
        self.credentials
            .extra_patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Ignoring invalid credential pattern '{}': {}", p, e);
                    None
                }
            })
            .collect()
    }
}

/// Default config template with helpful comments (used by `hookwarden config init`)
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# hookwarden configuration
# Every setting is optional. A missing or broken file falls back to defaults.

[logging]
# Log filter when RUST_LOG / HOOKWARDEN_LOG are unset (error | warn | info | debug)
level = "warn"

[hooks]
# Hooks listed here always allow silently, e.g. ["tracing-reminder"]
disabled = []

[credentials]
# Extra regexes for api-key-guard. They extend the built-in set, never replace it.
# extra_patterns = ['ghp_[A-Za-z0-9]{36}']
extra_patterns = []

# Extra filename suffixes exempt from api-key-guard (".env" and ".env.example" always are)
# exempt_suffixes = [".env.local"]
exempt_suffixes = []
"#;
