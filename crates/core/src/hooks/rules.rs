//! Declarative predicate primitives shared by every hook.
//!
//! A hook's policy is a [`Rule`]: a tool filter, a relevance matcher, a
//! trigger matcher, a severity and a message. Matchers are plain data built
//! from [`Pattern`] leaves and boolean combinators, so rule tables can live in
//! `static` items and be tested independently of any payload plumbing.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use super::event::InspectionRequest;
use super::verdict::Verdict;

/// Compiled regexes keyed by their source. `None` marks a pattern that failed
/// to compile, so the warning is logged once.
static REGEX_CACHE: Lazy<Mutex<HashMap<&'static str, Option<Regex>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn regex_is_match(source: &'static str, haystack: &str) -> bool {
    let mut cache = REGEX_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    let compiled = cache.entry(source).or_insert_with(|| match Regex::new(source) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Ignoring invalid hook pattern '{}': {}", source, e);
            None
        }
    });
    compiled.as_ref().is_some_and(|re| re.is_match(haystack))
}

/// A single string test
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    Regex(&'static str),
    Contains(&'static str),
    /// ASCII case-insensitive substring test
    ContainsIgnoreCase(&'static str),
    EndsWith(&'static str),
}

impl Pattern {
    pub fn matches(&self, haystack: &str) -> bool {
        match *self {
            Pattern::Regex(source) => regex_is_match(source, haystack),
            Pattern::Contains(needle) => haystack.contains(needle),
            Pattern::ContainsIgnoreCase(needle) => haystack
                .to_ascii_uppercase()
                .contains(&needle.to_ascii_uppercase()),
            Pattern::EndsWith(suffix) => haystack.ends_with(suffix),
        }
    }

    /// Regex source, if this is a regex pattern
    pub fn regex_source(&self) -> Option<&'static str> {
        match *self {
            Pattern::Regex(source) => Some(source),
            _ => None,
        }
    }
}

/// Boolean combinator over the path and content of a request
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Always,
    /// Test against `file_path`
    Path(Pattern),
    /// Test against the text being written (`content`, else `new_string`)
    Content(Pattern),
    /// Test against the final path component
    Basename(Pattern),
    Any(&'static [Matcher]),
    All(&'static [Matcher]),
    Not(&'static Matcher),
}

impl Matcher {
    pub fn matches(&self, request: &InspectionRequest) -> bool {
        match *self {
            Matcher::Always => true,
            Matcher::Path(p) => p.matches(&request.file_path),
            Matcher::Content(p) => p.matches(request.text()),
            Matcher::Basename(p) => p.matches(request.basename()),
            Matcher::Any(ms) => ms.iter().any(|m| m.matches(request)),
            Matcher::All(ms) => ms.iter().all(|m| m.matches(request)),
            Matcher::Not(m) => !m.matches(request),
        }
    }

    /// Every regex source reachable from this matcher
    pub fn regex_sources(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        self.collect_regex_sources(&mut out);
        out
    }

    fn collect_regex_sources(&self, out: &mut Vec<&'static str>) {
        match *self {
            Matcher::Always => {}
            Matcher::Path(p) | Matcher::Content(p) | Matcher::Basename(p) => {
                out.extend(p.regex_source());
            }
            Matcher::Any(ms) | Matcher::All(ms) => {
                for m in ms {
                    m.collect_regex_sources(out);
                }
            }
            Matcher::Not(m) => m.collect_regex_sources(out),
        }
    }
}

/// Host tools a rule cares about
#[derive(Debug, Clone, Copy)]
pub enum ToolFilter {
    Any,
    OneOf(&'static [&'static str]),
}

impl ToolFilter {
    pub fn matches(&self, tool_name: &str) -> bool {
        match self {
            ToolFilter::Any => true,
            ToolFilter::OneOf(names) => names.iter().any(|n| *n == tool_name),
        }
    }
}

/// Host lifecycle event a hook is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    PreToolUse,
    PostToolUse,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::PreToolUse => "PreToolUse",
            Stage::PostToolUse => "PostToolUse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Block,
}

impl Severity {
    pub fn verdict(self, message: String) -> Verdict {
        match self {
            Severity::Warn => Verdict::Warn(message),
            Severity::Block => Verdict::Block(message),
        }
    }
}

/// One row of a hook's policy table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub tools: ToolFilter,
    /// Guard over path (and optionally content) deciding whether the trigger runs
    pub relevance: Matcher,
    /// Skip the rule when the text being written is empty
    pub requires_content: bool,
    pub trigger: Matcher,
    pub severity: Severity,
    /// Message template; `{file_path}` is replaced by the request path
    pub message: &'static str,
}

impl Rule {
    /// Whether the trigger should be consulted at all for this request
    pub fn is_relevant(&self, request: &InspectionRequest) -> bool {
        self.tools.matches(&request.tool_name)
            && !(self.requires_content && request.text().is_empty())
            && self.relevance.matches(request)
    }

    pub fn evaluate(&self, request: &InspectionRequest) -> Verdict {
        if !self.is_relevant(request) || !self.trigger.matches(request) {
            return Verdict::Irrelevant;
        }
        self.severity.verdict(self.render(request))
    }

    pub fn render(&self, request: &InspectionRequest) -> String {
        self.message.replace("{file_path}", &request.file_path)
    }

    pub fn regex_sources(&self) -> Vec<&'static str> {
        let mut out = self.relevance.regex_sources();
        out.extend(self.trigger.regex_sources());
        out
    }
}
