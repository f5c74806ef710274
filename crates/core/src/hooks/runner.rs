//! Hook execution contract

use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};

use regex::Regex;
use tracing::debug;

use super::catalog::Hook;
use super::event::InspectionRequest;
use super::verdict::Verdict;
use crate::config::Config;
use crate::manifest::{FsManifestLookup, ManifestLookup, StaticManifestLookup};

/// Capabilities a hook may consult besides the request itself
pub struct HookContext {
    pub config: Config,
    pub manifests: Box<dyn ManifestLookup>,
    extra_credentials: Vec<Regex>,
}

impl HookContext {
    pub fn new(config: Config, manifests: Box<dyn ManifestLookup>) -> Self {
        let extra_credentials = config.extra_credential_patterns();
        Self {
            config,
            manifests,
            extra_credentials,
        }
    }

    /// Context for a real invocation: the given config, manifests read from disk
    pub fn with_filesystem(config: Config) -> Self {
        Self::new(config, Box::new(FsManifestLookup::new()))
    }

    pub fn extra_credential_patterns(&self) -> &[Regex] {
        &self.extra_credentials
    }
}

impl Default for HookContext {
    /// Default config and no manifest on disk
    fn default() -> Self {
        Self::new(Config::default(), Box::new(StaticManifestLookup::none()))
    }
}

/// Total function from raw stdin bytes to a verdict.
///
/// Disabled hooks, unparsable payloads and panics inside a hook all map to
/// [`Verdict::Irrelevant`]; nothing here can fail the host's tool call except
/// an explicit block.
pub fn evaluate(hook: &dyn Hook, raw: &[u8], ctx: &HookContext) -> Verdict {
    if ctx.config.is_disabled(hook.name()) {
        debug!("Hook '{}' disabled by config", hook.name());
        return Verdict::Irrelevant;
    }

    let Some(request) = InspectionRequest::parse(raw) else {
        debug!("Hook '{}' ignoring unparsable payload", hook.name());
        return Verdict::Irrelevant;
    };

    match panic::catch_unwind(AssertUnwindSafe(|| hook.inspect(&request, ctx))) {
        Ok(verdict) => verdict,
        Err(_) => {
            debug!("Hook '{}' panicked, allowing", hook.name());
            Verdict::Irrelevant
        }
    }
}

/// Runs hooks against the process streams
pub struct HookRunner {
    ctx: HookContext,
}

impl HookRunner {
    pub fn new(ctx: HookContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &HookContext {
        &self.ctx
    }

    pub fn evaluate(&self, hook: &dyn Hook, raw: &[u8]) -> Verdict {
        evaluate(hook, raw, &self.ctx)
    }

    /// Read the whole payload from `input`, write any diagnostic to `err`, and
    /// return the process exit code. Nothing is ever written to stdout.
    pub fn run<R: Read, W: Write>(&self, hook: &dyn Hook, mut input: R, mut err: W) -> i32 {
        let mut raw = Vec::new();
        if let Err(e) = input.read_to_end(&mut raw) {
            debug!("Hook '{}' failed to read stdin: {}", hook.name(), e);
            return 0;
        }

        let verdict = self.evaluate(hook, &raw);
        debug!("Hook '{}' verdict: {:?}", hook.name(), verdict.outcome());

        if let Some(diagnostic) = verdict.diagnostic()
            && let Err(e) = writeln!(err, "{}", diagnostic).and_then(|_| err.flush())
        {
            debug!("Hook '{}' failed to write diagnostic: {}", hook.name(), e);
        }

        verdict.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::catalog::{self, RuleHook};
    use crate::hooks::rules::Stage;
    use crate::hooks::verdict::Outcome;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Hook that panics on every relevant request
    struct Exploding;

    impl Hook for Exploding {
        fn name(&self) -> &'static str {
            "exploding"
        }
        fn plugin(&self) -> &'static str {
            "test"
        }
        fn stage(&self) -> Stage {
            Stage::PreToolUse
        }
        fn outcome(&self) -> Outcome {
            Outcome::Block
        }
        fn description(&self) -> &'static str {
            "panics"
        }
        fn inspect(&self, _request: &InspectionRequest, _ctx: &HookContext) -> Verdict {
            panic!("boom")
        }
    }

    fn run(hook: &dyn Hook, input: &[u8]) -> (i32, String) {
        let runner = HookRunner::new(HookContext::default());
        let mut err = Vec::new();
        let code = runner.run(hook, input, &mut err);
        (code, String::from_utf8(err).unwrap())
    }

    fn payload(tool: &str, path: &str, content: &str) -> Vec<u8> {
        json!({
            "tool_name": tool,
            "tool_input": {"file_path": path, "content": content}
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_malformed_input_is_silent_for_every_hook() {
        let inputs: [&[u8]; 5] = [b"", b"{", b"not json", b"[]", b"null"];
        for hook in catalog::all() {
            for input in inputs {
                let (code, err) = run(hook, input);
                assert_eq!(code, 0, "{}", hook.name());
                assert!(err.is_empty(), "{}", hook.name());
            }
        }
    }

    #[test]
    fn test_irrelevant_tool_is_silent_for_tool_filtered_hooks() {
        // Agent-builder and schema-builder hooks use ToolFilter::Any and read
        // flat payloads with no tool name, so a "Read" call is only irrelevant
        // to the mcp-server hooks, which filter on Write/Edit.
        let input = payload(
            "Read",
            "/x/mcp-server-a/src/index.ts",
            "console.log('up');\napp.listen(3000);",
        );
        for hook in catalog::for_plugin(catalog::mcp_server::PLUGIN) {
            let (code, err) = run(hook, &input);
            assert_eq!(code, 0, "{}", hook.name());
            assert!(err.is_empty(), "{}: {}", hook.name(), err);
        }
    }

    #[test]
    fn test_unrelated_write_is_silent_for_every_hook() {
        let input = payload("Write", "/x/docs/readme.md", "Nothing to see here.");
        for hook in catalog::all() {
            let (code, err) = run(hook, &input);
            assert_eq!(code, 0, "{}", hook.name());
            assert!(err.is_empty(), "{}: {}", hook.name(), err);
        }
    }

    #[test]
    fn test_block_writes_diagnostic_and_exits_one() {
        let key = "sk-abcdefghijklmnopqrstuvwxyz";
        let (code, err) = run(
            &catalog::agent_builder::API_KEY_GUARD,
            &payload("Write", "src/agent.ts", key),
        );
        assert_eq!(code, 1);
        assert!(err.starts_with("BLOCKED"));
        assert!(err.ends_with('\n'));
    }

    #[test]
    fn test_warning_exits_zero() {
        let (code, err) = run(
            &catalog::mcp_server::CONSOLE_LOG_GUARD,
            &payload("Write", "/w/mcp-server-a/src/tools.ts", "console.log(x)"),
        );
        assert_eq!(code, 0);
        assert!(err.contains("WARNING"));
    }

    #[test]
    fn test_idempotent() {
        let input = payload("Edit", "/w/mcp-server-a/src/index.ts", "console.log(1)");
        for hook in catalog::all() {
            assert_eq!(run(hook, &input), run(hook, &input), "{}", hook.name());
        }
    }

    #[test]
    fn test_panicking_hook_allows() {
        let (code, err) = run(&Exploding, &payload("Write", "a.ts", "x"));
        assert_eq!(code, 0);
        assert!(err.is_empty());
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_panicking_hook_logs_nothing_at_default_level() {
        let logs = SharedBuf::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let verdict = tracing::subscriber::with_default(subscriber, || {
            evaluate(&Exploding, &payload("Write", "a.ts", "x"), &HookContext::default())
        });

        assert_eq!(verdict, Verdict::Irrelevant);
        assert!(logs.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_disabled_hook_is_silent() {
        let config = Config::from_toml_str("[hooks]\ndisabled = [\"api-key-guard\"]").unwrap();
        let runner = HookRunner::new(HookContext::new(
            config,
            Box::new(StaticManifestLookup::none()),
        ));
        let mut err = Vec::new();
        let code = runner.run(
            &catalog::agent_builder::API_KEY_GUARD,
            &payload("Write", "a.py", "sk-abcdefghijklmnopqrstuvwxyz")[..],
            &mut err,
        );
        assert_eq!(code, 0);
        assert!(err.is_empty());
    }

    #[test]
    fn test_unreadable_input_allows() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }
        }

        let runner = HookRunner::new(HookContext::default());
        let mut err = Vec::new();
        let hook: &RuleHook = &catalog::mcp_server::MCP_JSON_REMINDER;
        assert_eq!(runner.run(hook, Broken, &mut err), 0);
        assert!(err.is_empty());
    }
}
