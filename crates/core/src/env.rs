//! Environment variable constants used throughout the application.
//!
//! Centralized definition of all `HOOKWARDEN_*` environment variables to ensure
//! consistency and avoid hardcoded strings.

/// Configuration file path override (e.g. `~/.config/hookwarden/config.toml`)
pub const HOOKWARDEN_CONFIG: &str = "HOOKWARDEN_CONFIG";

/// Log filter override, takes the same syntax as `RUST_LOG`
pub const HOOKWARDEN_LOG: &str = "HOOKWARDEN_LOG";
