//! hookwarden core: inspection hooks for coding-assistant plugins.
//!
//! Every hook reads one JSON payload describing a proposed file write/edit,
//! runs a small table of path and content predicates against it, and
//! produces a [`hooks::Verdict`]. This crate holds the payload model, the
//! rule primitives, the hook catalog and the execution contract; the
//! `hookwarden` binary is a thin shell around it.

pub mod config;
pub mod env;
pub mod error;
pub mod hooks;
pub mod manifest;

pub use config::Config;
pub use error::{HookwardenError, Result};
