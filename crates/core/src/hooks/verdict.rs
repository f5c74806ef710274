//! Verdict returned by hook evaluation

use serde::Serialize;

/// Coarse outcome of a verdict, as the host sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    AllowSilently,
    AllowWithWarning,
    Block,
}

impl Outcome {
    /// Lowercase label for listings (`"allow"`, `"warn"`, `"block"`).
    pub fn label(self) -> &'static str {
        match self {
            Outcome::AllowSilently => "allow",
            Outcome::AllowWithWarning => "warn",
            Outcome::Block => "block",
        }
    }
}

/// Decision a hook reaches for one inspection request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Not relevant, or nothing to report. Also the result of any parse failure.
    Irrelevant,
    /// Allow the write, but show the diagnostic to the operator
    Warn(String),
    /// Reject the write with the diagnostic
    Block(String),
}

impl Verdict {
    pub fn outcome(&self) -> Outcome {
        match self {
            Verdict::Irrelevant => Outcome::AllowSilently,
            Verdict::Warn(_) => Outcome::AllowWithWarning,
            Verdict::Block(_) => Outcome::Block,
        }
    }

    /// Process exit status: 0 = allow (silently or with warning), 1 = block.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Block(_) => 1,
            _ => 0,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Verdict::Irrelevant => None,
            Verdict::Warn(msg) | Verdict::Block(msg) => Some(msg),
        }
    }

    /// Check if this verdict lets the write proceed
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Verdict::Block(_))
    }
}
