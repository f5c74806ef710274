//! Hooks shipped with the `openai-agent-builder` plugin.
//!
//! These read the payload without caring about the tool name; relevance comes
//! from the file extension or agent-file naming convention alone.

use std::path::Path;

use tracing::debug;

use crate::hooks::event::InspectionRequest;
use crate::hooks::rules::{Matcher, Pattern, Rule, Severity, Stage, ToolFilter};
use crate::hooks::runner::HookContext;
use crate::hooks::verdict::{Outcome, Verdict};
use crate::manifest::major_version;

use super::{Hook, RuleHook};

pub const PLUGIN: &str = "openai-agent-builder";

const IS_PYTHON: Matcher = Matcher::Path(Pattern::EndsWith(".py"));
const IS_TYPESCRIPT: Matcher = Matcher::Any(&[
    Matcher::Path(Pattern::EndsWith(".ts")),
    Matcher::Path(Pattern::EndsWith(".tsx")),
]);

/// Files that conventionally hold an agent definition
const IS_AGENT_FILE: Matcher = Matcher::Any(&[
    Matcher::Path(Pattern::Contains("agent.py")),
    Matcher::Path(Pattern::Contains("agent.ts")),
    Matcher::Path(Pattern::Contains("triage.py")),
    Matcher::Path(Pattern::Contains("triage.ts")),
]);

/// Covers both `Agent(` (Python) and `new Agent(` (TypeScript)
const CONSTRUCTS_AGENT: Matcher = Matcher::Content(Pattern::Contains("Agent("));

const RUN_CALLS: Matcher = Matcher::Any(&[
    Matcher::Content(Pattern::Regex(r"Runner\.run\(")),
    Matcher::Content(Pattern::Regex(r"await\s+run\(")),
    Matcher::Content(Pattern::Regex(r"agent\.run\(")),
    Matcher::Content(Pattern::Regex(r"Runner\.run_streamed\(")),
]);

const PYTHON_HANDLED: Matcher = Matcher::All(&[
    Matcher::Content(Pattern::Contains("try:")),
    Matcher::Content(Pattern::Contains("except")),
]);

const TYPESCRIPT_HANDLED: Matcher = Matcher::All(&[
    Matcher::Content(Pattern::Contains("try")),
    Matcher::Content(Pattern::Contains("catch")),
]);

pub static AGENT_ERROR_HANDLING: RuleHook = RuleHook {
    name: "agent-error-handling",
    plugin: PLUGIN,
    stage: Stage::PreToolUse,
    description: "Warn when agent run calls are not wrapped in error handling",
    rule: Rule {
        tools: ToolFilter::Any,
        relevance: Matcher::All(&[Matcher::Any(&[IS_PYTHON, IS_TYPESCRIPT]), RUN_CALLS]),
        requires_content: true,
        trigger: Matcher::Any(&[
            Matcher::All(&[IS_PYTHON, Matcher::Not(&PYTHON_HANDLED)]),
            Matcher::All(&[Matcher::Not(&IS_PYTHON), Matcher::Not(&TYPESCRIPT_HANDLED)]),
        ]),
        severity: Severity::Warn,
        message: "WARNING: Agent run calls (Runner.run / run()) can fail with network errors, \
                  rate limits, or guardrail trips. Wrap in try/except (Python) or try/catch \
                  (TypeScript) for production safety.",
    },
};

/// Credential shapes that must never be written into source files
const CREDENTIAL_PATTERNS: &[Matcher] = &[
    // OpenAI secret key format
    Matcher::Content(Pattern::Regex(r"sk-[a-zA-Z0-9]{20,}")),
    Matcher::Content(Pattern::Regex(r#"OPENAI_API_KEY\s*=\s*["'][^"']{10,}["']"#)),
    Matcher::Content(Pattern::Regex(r#"api_key\s*=\s*["']sk-"#)),
    Matcher::Content(Pattern::Regex(r#"apiKey\s*[:=]\s*["']sk-"#)),
    Matcher::Content(Pattern::Regex(r"Authorization.*Bearer\s+sk-")),
];

const API_KEY_RULE: Rule = Rule {
    tools: ToolFilter::Any,
    relevance: Matcher::Not(&Matcher::Any(&[
        Matcher::Path(Pattern::EndsWith(".env")),
        Matcher::Path(Pattern::EndsWith(".env.example")),
    ])),
    requires_content: true,
    trigger: Matcher::Any(CREDENTIAL_PATTERNS),
    severity: Severity::Block,
    message: "BLOCKED: Hardcoded API key detected. \
              Use .env and os.getenv() (Python) or process.env (TypeScript) \
              instead of hardcoding API keys in source files.",
};

/// Blocks hardcoded credentials. Config may add patterns and exempt suffixes
/// on top of the built-in table.
#[derive(Debug)]
pub struct ApiKeyGuard;

pub static API_KEY_GUARD: ApiKeyGuard = ApiKeyGuard;

impl Hook for ApiKeyGuard {
    fn name(&self) -> &'static str {
        "api-key-guard"
    }

    fn plugin(&self) -> &'static str {
        PLUGIN
    }

    fn stage(&self) -> Stage {
        Stage::PreToolUse
    }

    fn outcome(&self) -> Outcome {
        Outcome::Block
    }

    fn description(&self) -> &'static str {
        "Block writes containing hardcoded API keys (except .env files)"
    }

    fn inspect(&self, request: &InspectionRequest, ctx: &HookContext) -> Verdict {
        let exempt = ctx
            .config
            .credentials
            .exempt_suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && request.file_path.ends_with(suffix.as_str()));
        if exempt || !API_KEY_RULE.is_relevant(request) {
            return Verdict::Irrelevant;
        }

        let text = request.text();
        if API_KEY_RULE.trigger.matches(request)
            || ctx.extra_credential_patterns().iter().any(|re| re.is_match(text))
        {
            return API_KEY_RULE.severity.verdict(API_KEY_RULE.render(request));
        }
        Verdict::Irrelevant
    }

    fn regex_sources(&self) -> Vec<&'static str> {
        API_KEY_RULE.regex_sources()
    }
}

const GUARDRAIL_KEYWORDS: &[Matcher] = &[
    Matcher::Content(Pattern::Contains("guardrail")),
    Matcher::Content(Pattern::Contains("input_guardrails")),
    Matcher::Content(Pattern::Contains("output_guardrails")),
    Matcher::Content(Pattern::Contains("inputGuardrails")),
    Matcher::Content(Pattern::Contains("outputGuardrails")),
    Matcher::Content(Pattern::Contains("InputGuardrail")),
    Matcher::Content(Pattern::Contains("OutputGuardrail")),
];

pub static GUARDRAILS_REMINDER: RuleHook = RuleHook {
    name: "guardrails-reminder",
    plugin: PLUGIN,
    stage: Stage::PostToolUse,
    description: "Remind to add guardrails to agent definitions",
    rule: Rule {
        tools: ToolFilter::Any,
        relevance: Matcher::All(&[IS_AGENT_FILE, CONSTRUCTS_AGENT]),
        requires_content: true,
        trigger: Matcher::Not(&Matcher::Any(GUARDRAIL_KEYWORDS)),
        severity: Severity::Warn,
        message: "REMINDER: Consider adding guardrails for production safety. \
                  Python: `input_guardrails=[...]` on Agent. \
                  TypeScript: `inputGuardrails: [...]` in Agent config.",
    },
};

const TRACING_KEYWORDS: &[Matcher] = &[
    Matcher::Content(Pattern::Contains("from agents import trace")),
    Matcher::Content(Pattern::Contains("import trace")),
    Matcher::Content(Pattern::Contains("withTrace")),
    Matcher::Content(Pattern::Contains("tracing")),
];

pub static TRACING_REMINDER: RuleHook = RuleHook {
    name: "tracing-reminder",
    plugin: PLUGIN,
    stage: Stage::PostToolUse,
    description: "Remind to add tracing to agent definitions",
    rule: Rule {
        tools: ToolFilter::Any,
        relevance: Matcher::All(&[IS_AGENT_FILE, CONSTRUCTS_AGENT]),
        requires_content: true,
        trigger: Matcher::Not(&Matcher::Any(TRACING_KEYWORDS)),
        severity: Severity::Warn,
        message: "REMINDER: Consider adding tracing for debugging and monitoring. \
                  Python: `from agents import trace` + `with trace('name'):`. \
                  TypeScript: configure tracing in agent options.",
    },
};

/// Major version of `zod` the TypeScript Agents SDK requires
pub const REQUIRED_ZOD_MAJOR: u64 = 4;

/// Relevance plus the content fallback used when no manifest declares zod
const ZOD_RULE: Rule = Rule {
    tools: ToolFilter::Any,
    relevance: Matcher::All(&[
        IS_TYPESCRIPT,
        Matcher::Content(Pattern::Contains("@openai/agents")),
        Matcher::Content(Pattern::Regex(r#"from\s+['"]zod['"]"#)),
    ]),
    requires_content: true,
    // Removed in v4
    trigger: Matcher::Content(Pattern::Regex(r"z\.nativeEnum\(")),
    severity: Severity::Block,
    message: "BLOCKED: z.nativeEnum() is a Zod v3 pattern. \
              OpenAI Agents SDK TypeScript requires Zod v4. \
              Use z.enum() or z.literal() instead.",
};

/// Blocks Agents SDK sources that pair with a pre-v4 Zod.
///
/// The declared version in `package.json` is authoritative: a v4 declaration
/// allows the write outright, anything else blocks. Without a declaration the
/// hook falls back to spotting APIs removed in v4.
#[derive(Debug)]
pub struct ZodV4Check;

pub static ZOD_V4_CHECK: ZodV4Check = ZodV4Check;

impl Hook for ZodV4Check {
    fn name(&self) -> &'static str {
        "zod-v4-check"
    }

    fn plugin(&self) -> &'static str {
        PLUGIN
    }

    fn stage(&self) -> Stage {
        Stage::PreToolUse
    }

    fn outcome(&self) -> Outcome {
        Outcome::Block
    }

    fn description(&self) -> &'static str {
        "Block Agents SDK TypeScript that uses Zod v3"
    }

    fn inspect(&self, request: &InspectionRequest, ctx: &HookContext) -> Verdict {
        if !ZOD_RULE.is_relevant(request) {
            return Verdict::Irrelevant;
        }

        match ctx
            .manifests
            .dependency_version(Path::new(&request.file_path), "zod")
        {
            Some(version) if major_version(&version) == Some(REQUIRED_ZOD_MAJOR) => {
                debug!("zod {} satisfies v{}", version, REQUIRED_ZOD_MAJOR);
                Verdict::Irrelevant
            }
            Some(version) => Verdict::Block(format!(
                "BLOCKED: Zod version '{}' detected. \
                 OpenAI Agents SDK for TypeScript requires Zod v4. \
                 Update package.json to use `\"zod\": \"^4\"` and run `npm install`.",
                version
            )),
            None => ZOD_RULE.evaluate(request),
        }
    }

    fn regex_sources(&self) -> Vec<&'static str> {
        ZOD_RULE.regex_sources()
    }
}
