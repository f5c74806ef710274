//! Host registration documents for the built-in hooks.
//!
//! Each plugin registers its hooks in a `hooks.json` fragment of the form
//!
//! ```json
//! {
//!   "hooks": {
//!     "PreToolUse": [
//!       {
//!         "matcher": "Write|Edit",
//!         "hooks": [
//!           { "type": "command", "command": "hookwarden run api-key-guard" }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! The same fragment can be merged into a settings file; merging is
//! idempotent and keeps every unrelated key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value, json};
use tracing::debug;

use super::catalog::{self, Hook};
use super::rules::Stage;
use crate::error::{HookwardenError, Result};

/// Host tools every hook is registered for; finer filtering happens inside the hook
pub const TOOL_MATCHER: &str = "Write|Edit";

/// Default command used to invoke the binary
pub const DEFAULT_COMMAND: &str = "hookwarden";

fn command_for(prefix: &str, hook: &dyn Hook) -> String {
    format!("{} run {}", prefix, hook.name())
}

/// Registration fragment for every hook of `plugin`
pub fn plugin_hooks(plugin: &str, command_prefix: &str) -> Result<Value> {
    let hooks = catalog::for_plugin(plugin);
    if hooks.is_empty() {
        return Err(HookwardenError::UnknownPlugin(plugin.to_string()));
    }
    Ok(fragment(&hooks, command_prefix))
}

/// Registration fragment for the whole catalog
pub fn all_hooks(command_prefix: &str) -> Value {
    fragment(&catalog::all(), command_prefix)
}

fn fragment(hooks: &[&'static dyn Hook], command_prefix: &str) -> Value {
    let mut by_stage: BTreeMap<Stage, Vec<Value>> = BTreeMap::new();
    for hook in hooks {
        by_stage.entry(hook.stage()).or_default().push(json!({
            "type": "command",
            "command": command_for(command_prefix, *hook),
        }));
    }

    let stages: Map<String, Value> = by_stage
        .into_iter()
        .map(|(stage, entries)| {
            (
                stage.as_str().to_string(),
                json!([{ "matcher": TOOL_MATCHER, "hooks": entries }]),
            )
        })
        .collect();

    json!({ "hooks": stages })
}

/// Merge a registration fragment into the settings file at `path`.
///
/// Creates the file if missing. Commands already registered under a stage
/// are not added twice. Returns the number of commands added.
///
/// A settings file whose root, `hooks` table or stage entries have an
/// unexpected type is rejected with [`HookwardenError::InvalidSettings`] and
/// left untouched.
pub fn install(path: &Path, fragment: &Value) -> Result<usize> {
    let mut settings: Value = if path.exists() {
        serde_json::from_str(&fs::read_to_string(path)?)?
    } else {
        json!({})
    };

    let added = merge(&mut settings, fragment)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&settings)?)?;
    debug!("Registered {} hook command(s) in {}", added, path.display());
    Ok(added)
}

fn merge(settings: &mut Value, fragment: &Value) -> Result<usize> {
    let root = settings
        .as_object_mut()
        .ok_or_else(|| invalid("root is not an object"))?;
    let existing = root
        .entry("hooks")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| invalid("\"hooks\" is not an object"))?;

    let Some(incoming) = fragment.get("hooks").and_then(Value::as_object) else {
        return Ok(0);
    };

    // Reject every malformed stage before touching any of them
    for stage in incoming.keys() {
        if let Some(groups) = existing.get(stage)
            && !groups.is_array()
        {
            return Err(invalid(&format!("\"hooks.{}\" is not an array", stage)));
        }
    }

    let mut added = 0;
    for (stage, groups) in incoming {
        let stage_groups = existing
            .entry(stage.clone())
            .or_insert_with(|| json!([]))
            .as_array_mut()
            .ok_or_else(|| invalid(&format!("\"hooks.{}\" is not an array", stage)))?;

        for group in groups.as_array().into_iter().flatten() {
            let commands: Vec<&Value> = group
                .get("hooks")
                .and_then(Value::as_array)
                .map(|hs| hs.iter().collect())
                .unwrap_or_default();

            let missing: Vec<Value> = commands
                .into_iter()
                .filter(|entry| !is_registered(stage_groups.as_slice(), entry))
                .cloned()
                .collect();
            if missing.is_empty() {
                continue;
            }
            added += missing.len();

            let matcher = group.get("matcher").cloned().unwrap_or(json!(TOOL_MATCHER));
            match stage_groups
                .iter_mut()
                .find(|g| g.get("matcher") == Some(&matcher))
                .and_then(|g| g.get_mut("hooks"))
                .and_then(Value::as_array_mut)
            {
                Some(hooks) => hooks.extend(missing),
                None => stage_groups.push(json!({ "matcher": matcher, "hooks": missing })),
            }
        }
    }
    Ok(added)
}

fn invalid(reason: &str) -> HookwardenError {
    HookwardenError::InvalidSettings(reason.to_string())
}

fn is_registered(groups: &[Value], entry: &Value) -> bool {
    let Some(command) = entry.get("command").and_then(Value::as_str) else {
        return false;
    };
    groups
        .iter()
        .filter_map(|g| g.get("hooks").and_then(Value::as_array))
        .flatten()
        .any(|h| h.get("command").and_then(Value::as_str) == Some(command))
}
