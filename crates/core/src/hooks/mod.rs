//! Inspection hooks for coding-assistant file writes
//!
//! The host pipes one JSON payload per proposed Write/Edit to the hook's
//! stdin, in one of two shapes:
//!
//! ```json
//! { "tool_name": "Write", "tool_input": { "file_path": "src/agent.ts", "content": "..." } }
//! { "file_path": "supabase/migrations/001_init.sql", "content": "..." }
//! ```
//!
//! A hook answers with its exit code and, optionally, one diagnostic on stderr:
//! - exit 0, no output: allow silently
//! - exit 0, diagnostic: allow with a warning
//! - exit 1, diagnostic: block the tool call
//!
//! Anything the hook cannot make sense of is allowed silently.

pub mod catalog;
mod event;
pub mod registration;
mod rules;
mod runner;
mod verdict;

pub use catalog::{Hook, RuleHook};
pub use event::{InspectionRequest, PayloadShape};
pub use rules::{Matcher, Pattern, Rule, Severity, Stage, ToolFilter};
pub use runner::{HookContext, HookRunner, evaluate};
pub use verdict::{Outcome, Verdict};
