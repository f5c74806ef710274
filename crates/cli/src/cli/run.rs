use std::io;
use std::path::Path;

use clap::Args;
use tracing::warn;

use hookwarden_core::Config;
use hookwarden_core::hooks::{HookContext, HookRunner, catalog};

#[derive(Args)]
pub struct RunArgs {
    /// Hook name (see `hookwarden list`)
    pub hook: String,
}

pub fn run(args: RunArgs, config: Config) -> i32 {
    run_hook(&args.hook, config)
}

/// Evaluate `name` against stdin and return the exit code.
///
/// An unknown hook name allows.
pub fn run_hook(name: &str, config: Config) -> i32 {
    let Some(hook) = catalog::find(name) else {
        warn!("Unknown hook '{}', allowing", name);
        return 0;
    };

    let runner = HookRunner::new(HookContext::with_filesystem(config));
    runner.run(hook, io::stdin().lock(), io::stderr().lock())
}

/// Hook name when the binary is invoked under a hook's own name
pub fn hook_name_from_argv0(arg0: &str) -> Option<&'static str> {
    let stem = Path::new(arg0).file_stem()?.to_str()?;
    catalog::find(stem).map(|hook| hook.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv0_dispatch() {
        assert_eq!(hook_name_from_argv0("api-key-guard"), Some("api-key-guard"));
        assert_eq!(
            hook_name_from_argv0("/plugins/openai-agent-builder/hooks/zod-v4-check"),
            Some("zod-v4-check")
        );
        assert_eq!(
            hook_name_from_argv0(r"hooks/console-log-guard.exe"),
            Some("console-log-guard")
        );
    }

    #[test]
    fn test_argv0_regular_binary() {
        assert_eq!(hook_name_from_argv0("/usr/local/bin/hookwarden"), None);
        assert_eq!(hook_name_from_argv0(""), None);
    }
}
