//! Hooks shipped with the `mcp-server-builder` plugin.
//!
//! All three only look at TypeScript sources under a `mcp-server*` directory.

use crate::hooks::rules::{Matcher, Pattern, Rule, Severity, Stage, ToolFilter};

use super::RuleHook;

pub const PLUGIN: &str = "mcp-server-builder";

const WRITE_OR_EDIT: ToolFilter = ToolFilter::OneOf(&["Write", "Edit"]);

/// Server entry point written without importing and applying an auth middleware
pub static AUTH_MIDDLEWARE_REMINDER: RuleHook = RuleHook {
    name: "auth-middleware-reminder",
    plugin: PLUGIN,
    stage: Stage::PostToolUse,
    description: "Warn when an MCP server entry point lacks auth middleware",
    rule: Rule {
        tools: WRITE_OR_EDIT,
        relevance: Matcher::Path(Pattern::Regex(r"mcp-server[^/]*/src/(index|server)\.ts$")),
        requires_content: true,
        trigger: Matcher::Not(&Matcher::All(&[
            Matcher::Content(Pattern::Regex(r"(?i)import.*auth")),
            Matcher::Content(Pattern::Regex(r"authMiddleware|apiKeyMiddleware|auth\(")),
        ])),
        severity: Severity::Warn,
        message: "[mcp-server-builder] REMINDER: {file_path} appears to be an MCP server entry point.\n\
                  Ensure you import and apply an auth middleware (authMiddleware / apiKeyMiddleware)\n\
                  to all /mcp routes before connecting the transport.",
    },
};

/// stdout is the JSON-RPC channel of a stdio MCP server
pub static CONSOLE_LOG_GUARD: RuleHook = RuleHook {
    name: "console-log-guard",
    plugin: PLUGIN,
    stage: Stage::PreToolUse,
    description: "Warn when console.log is written into MCP server TypeScript",
    rule: Rule {
        tools: WRITE_OR_EDIT,
        relevance: Matcher::Path(Pattern::Regex(r"mcp-server[^/]*/.*\.ts$")),
        requires_content: true,
        trigger: Matcher::Content(Pattern::Regex(r"\bconsole\.log\b")),
        severity: Severity::Warn,
        message: "[mcp-server-builder] WARNING: console.log detected in {file_path}\n\
                  MCP servers must not write to stdout (reserved for JSON-RPC).\n\
                  Use console.error() for all logging.",
    },
};

/// Fires on creation only, so it does not need the written content
pub static MCP_JSON_REMINDER: RuleHook = RuleHook {
    name: "mcp-json-reminder",
    plugin: PLUGIN,
    stage: Stage::PostToolUse,
    description: "Remind to register a newly created MCP server in .mcp.json",
    rule: Rule {
        tools: ToolFilter::OneOf(&["Write"]),
        relevance: Matcher::Path(Pattern::Regex(
            r"mcp-server[^/]+/(src/index\.ts|package\.json)$",
        )),
        requires_content: false,
        trigger: Matcher::Always,
        severity: Severity::Warn,
        message: "[mcp-server-builder] REMINDER: New MCP server file created at {file_path}\n\
                  Don't forget to add an entry to .mcp.json:\n  \
                  \"your-server-name\": {\n    \
                  \"type\": \"http\",\n    \
                  \"url\": \"http://localhost:<PORT>/mcp\",\n    \
                  \"headers\": { \"Authorization\": \"Bearer ${YOUR_TOKEN}\" }\n  \
                  }",
    },
};
