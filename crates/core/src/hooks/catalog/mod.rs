//! Built-in hook catalog.
//!
//! Hooks are grouped by the plugin that ships them. Most are a single static
//! [`Rule`] wrapped in a [`RuleHook`]; the credential guard, the Zod version
//! guard and the model sync reminder need context or computed messages and
//! implement [`Hook`] directly.

pub mod agent_builder;
pub mod mcp_server;
pub mod schema_builder;

use super::event::InspectionRequest;
use super::rules::{Rule, Severity, Stage};
use super::runner::HookContext;
use super::verdict::{Outcome, Verdict};

pub trait Hook: Send + Sync {
    /// Stable name used on the command line and in registrations
    fn name(&self) -> &'static str;
    /// Plugin that ships this hook
    fn plugin(&self) -> &'static str;
    fn stage(&self) -> Stage;
    /// Most severe outcome this hook can produce
    fn outcome(&self) -> Outcome;
    fn description(&self) -> &'static str;
    fn inspect(&self, request: &InspectionRequest, ctx: &HookContext) -> Verdict;

    /// Regex sources used by this hook's tables
    fn regex_sources(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// A hook whose whole policy is one static rule
#[derive(Debug)]
pub struct RuleHook {
    pub name: &'static str,
    pub plugin: &'static str,
    pub stage: Stage,
    pub description: &'static str,
    pub rule: Rule,
}

impl Hook for RuleHook {
    fn name(&self) -> &'static str {
        self.name
    }

    fn plugin(&self) -> &'static str {
        self.plugin
    }

    fn stage(&self) -> Stage {
        self.stage
    }

    fn outcome(&self) -> Outcome {
        severity_outcome(self.rule.severity)
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn inspect(&self, request: &InspectionRequest, _ctx: &HookContext) -> Verdict {
        self.rule.evaluate(request)
    }

    fn regex_sources(&self) -> Vec<&'static str> {
        self.rule.regex_sources()
    }
}

pub(crate) fn severity_outcome(severity: Severity) -> Outcome {
    match severity {
        Severity::Warn => Outcome::AllowWithWarning,
        Severity::Block => Outcome::Block,
    }
}

/// Every built-in hook, grouped by plugin in a stable order
pub fn all() -> Vec<&'static dyn Hook> {
    let hooks: [&'static dyn Hook; 10] = [
        &mcp_server::AUTH_MIDDLEWARE_REMINDER,
        &mcp_server::CONSOLE_LOG_GUARD,
        &mcp_server::MCP_JSON_REMINDER,
        &agent_builder::AGENT_ERROR_HANDLING,
        &agent_builder::API_KEY_GUARD,
        &agent_builder::GUARDRAILS_REMINDER,
        &agent_builder::TRACING_REMINDER,
        &agent_builder::ZOD_V4_CHECK,
        &schema_builder::MIGRATION_MODEL_SYNC_REMINDER,
        &schema_builder::MODEL_SCHEMA_SYNC_REMINDER,
    ];
    hooks.to_vec()
}

pub fn find(name: &str) -> Option<&'static dyn Hook> {
    all().into_iter().find(|h| h.name() == name)
}

/// Distinct plugin names, in catalog order
pub fn plugins() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for hook in all() {
        if !out.contains(&hook.plugin()) {
            out.push(hook.plugin());
        }
    }
    out
}

pub fn for_plugin(plugin: &str) -> Vec<&'static dyn Hook> {
    all().into_iter().filter(|h| h.plugin() == plugin).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::collections::HashSet;

    #[test]
    fn all_hook_patterns_compile() {
        for hook in all() {
            for p in hook.regex_sources() {
                assert!(Regex::new(p).is_ok(), "{}: failed to compile {}", hook.name(), p);
            }
        }
    }

    #[test]
    fn hook_names_are_unique() {
        let names: HashSet<_> = all().iter().map(|h| h.name()).collect();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("api-key-guard").unwrap().name(), "api-key-guard");
        assert!(find("no-such-hook").is_none());
    }

    #[test]
    fn test_plugins() {
        assert_eq!(
            plugins(),
            vec![
                "mcp-server-builder",
                "openai-agent-builder",
                "supabase-schema-builder"
            ]
        );
        assert_eq!(for_plugin("mcp-server-builder").len(), 3);
        assert_eq!(for_plugin("openai-agent-builder").len(), 5);
        assert_eq!(for_plugin("supabase-schema-builder").len(), 2);
    }

    #[test]
    fn blocking_hooks() {
        let blocking: Vec<_> = all()
            .into_iter()
            .filter(|h| h.outcome() == Outcome::Block)
            .map(|h| h.name())
            .collect();
        assert_eq!(blocking, vec!["api-key-guard", "zod-v4-check"]);
    }
}
