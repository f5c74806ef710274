//! Hooks shipped with the `supabase-schema-builder` plugin.
//!
//! A schema change has to be mirrored in three generated model layers (Swift,
//! Kotlin, TypeScript). These reminders fire when one side moves.

use crate::hooks::event::InspectionRequest;
use crate::hooks::rules::{Matcher, Pattern, Rule, Severity, Stage, ToolFilter};
use crate::hooks::runner::HookContext;
use crate::hooks::verdict::{Outcome, Verdict};

use super::{Hook, RuleHook};

pub const PLUGIN: &str = "supabase-schema-builder";

pub static MIGRATION_MODEL_SYNC_REMINDER: RuleHook = RuleHook {
    name: "migration-model-sync-reminder",
    plugin: PLUGIN,
    stage: Stage::PreToolUse,
    description: "Remind to regenerate models when a migration contains DDL",
    rule: Rule {
        tools: ToolFilter::Any,
        relevance: Matcher::All(&[
            Matcher::Path(Pattern::Contains("supabase/migrations/")),
            Matcher::Path(Pattern::EndsWith(".sql")),
        ]),
        requires_content: true,
        trigger: Matcher::Any(&[
            Matcher::Content(Pattern::ContainsIgnoreCase("CREATE TABLE")),
            Matcher::Content(Pattern::ContainsIgnoreCase("ALTER TABLE")),
            Matcher::Content(Pattern::ContainsIgnoreCase("DROP TABLE")),
        ]),
        severity: Severity::Warn,
        message: "\n[schema-builder] Migration with DDL detected.\n\
                  [schema-builder] After applying, remember to:\n\
                  [schema-builder]   1. Generate TS types (MCP generate_typescript_types or supabase gen types)\n\
                  [schema-builder]   2. Create/update Swift model in multi-repo-ios/multi-repo-ios/Models/\n\
                  [schema-builder]   3. Create/update Kotlin model in multi-repo-android/.../data/model/\n\
                  [schema-builder]   4. Update docs/api-contracts.md\n\
                  [schema-builder] Or use /schema-design or /add-migration to do this automatically.\n",
    },
};

/// Platform whose generated model file was edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Swift,
    Kotlin,
    TypeScript,
}

const SWIFT_MODEL: Matcher = Matcher::All(&[
    Matcher::Path(Pattern::EndsWith(".swift")),
    Matcher::Path(Pattern::Contains("multi-repo-ios")),
    Matcher::Path(Pattern::Contains("/Models/")),
    Matcher::Basename(Pattern::Contains("Model")),
]);

const KOTLIN_MODEL: Matcher = Matcher::All(&[
    Matcher::Path(Pattern::EndsWith(".kt")),
    Matcher::Path(Pattern::Contains("multi-repo-android")),
    Matcher::Path(Pattern::Contains("/data/model/")),
    Matcher::Basename(Pattern::Contains("Model")),
]);

const TYPESCRIPT_TYPES: Matcher = Matcher::All(&[
    Matcher::Path(Pattern::EndsWith(".ts")),
    Matcher::Path(Pattern::Contains("multi-repo-nextjs")),
    Matcher::Basename(Pattern::Contains("database.types")),
]);

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Swift, Platform::Kotlin, Platform::TypeScript];

    /// Which platform's model file `request` points at, if any
    pub fn detect(request: &InspectionRequest) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.matcher().matches(request))
    }

    fn matcher(self) -> Matcher {
        match self {
            Platform::Swift => SWIFT_MODEL,
            Platform::Kotlin => KOTLIN_MODEL,
            Platform::TypeScript => TYPESCRIPT_TYPES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Swift => "Swift",
            Platform::Kotlin => "Kotlin",
            Platform::TypeScript => "TypeScript",
        }
    }

    /// Where this platform's counterpart of a model lives
    pub fn counterpart(self) -> &'static str {
        match self {
            Platform::Swift => "Swift model (multi-repo-ios/multi-repo-ios/Models/)",
            Platform::Kotlin => "Kotlin model (multi-repo-android/.../data/model/)",
            Platform::TypeScript => "TypeScript types (multi-repo-nextjs/lib/database.types.ts)",
        }
    }
}

/// Reminds to keep the other platforms' models in sync with an edited one.
/// Only the path matters; the edit content is never inspected.
#[derive(Debug)]
pub struct ModelSchemaSyncReminder;

pub static MODEL_SCHEMA_SYNC_REMINDER: ModelSchemaSyncReminder = ModelSchemaSyncReminder;

impl ModelSchemaSyncReminder {
    fn message(platform: Platform, basename: &str) -> String {
        let mut msg = format!(
            "\n[schema-sync] {} model file edited: {}\n\
             [schema-sync] Ensure these counterparts match:\n",
            platform.label(),
            basename
        );
        for other in Platform::ALL.into_iter().filter(|p| *p != platform) {
            msg.push_str(&format!("[schema-sync]   - {}\n", other.counterpart()));
        }
        msg.push_str(
            "[schema-sync]   - Supabase schema (supabase/migrations/)\n\
             [schema-sync]   - docs/api-contracts.md\n\
             [schema-sync] Run supabase-schema-validator agent to verify sync.\n",
        );
        msg
    }
}

impl Hook for ModelSchemaSyncReminder {
    fn name(&self) -> &'static str {
        "model-schema-sync-reminder"
    }

    fn plugin(&self) -> &'static str {
        PLUGIN
    }

    fn stage(&self) -> Stage {
        Stage::PostToolUse
    }

    fn outcome(&self) -> Outcome {
        Outcome::AllowWithWarning
    }

    fn description(&self) -> &'static str {
        "Remind to sync counterpart models when a generated model file changes"
    }

    fn inspect(&self, request: &InspectionRequest, _ctx: &HookContext) -> Verdict {
        if request.file_path.is_empty() {
            return Verdict::Irrelevant;
        }
        match Platform::detect(request) {
            Some(platform) => Verdict::Warn(Self::message(platform, request.basename())),
            None => Verdict::Irrelevant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(path: &str, content: &str) -> InspectionRequest {
        InspectionRequest::from_value(&json!({"file_path": path, "content": content})).unwrap()
    }

    fn inspect(hook: &dyn Hook, req: &InspectionRequest) -> Verdict {
        hook.inspect(req, &HookContext::default())
    }

    const MIGRATION: &str = "supabase/migrations/20250101000000_profiles.sql";

    #[test]
    fn migration_reminder_fires_on_ddl() {
        let verdict = inspect(
            &MIGRATION_MODEL_SYNC_REMINDER,
            &flat(MIGRATION, "create table public.profiles (id uuid primary key);"),
        );
        let msg = verdict.diagnostic().unwrap();
        assert!(msg.starts_with("\n[schema-builder] Migration with DDL detected.\n"));
        assert!(msg.contains("4. Update docs/api-contracts.md"));
        assert_eq!(verdict.exit_code(), 0);
    }

    #[test]
    fn migration_reminder_all_ddl_kinds() {
        for stmt in ["ALTER TABLE x ADD COLUMN y int;", "drop table if exists x;"] {
            assert!(
                matches!(
                    inspect(&MIGRATION_MODEL_SYNC_REMINDER, &flat(MIGRATION, stmt)),
                    Verdict::Warn(_)
                ),
                "{stmt}"
            );
        }
    }

    #[test]
    fn migration_reminder_ignores_dml_and_other_paths() {
        assert_eq!(
            inspect(
                &MIGRATION_MODEL_SYNC_REMINDER,
                &flat(MIGRATION, "insert into profiles values (1);")
            ),
            Verdict::Irrelevant
        );
        assert_eq!(
            inspect(
                &MIGRATION_MODEL_SYNC_REMINDER,
                &flat("supabase/seed.sql", "CREATE TABLE x ();")
            ),
            Verdict::Irrelevant
        );
        assert_eq!(
            inspect(
                &MIGRATION_MODEL_SYNC_REMINDER,
                &flat("supabase/migrations/notes.md", "CREATE TABLE x ();")
            ),
            Verdict::Irrelevant
        );
        assert_eq!(
            inspect(&MIGRATION_MODEL_SYNC_REMINDER, &flat(MIGRATION, "")),
            Verdict::Irrelevant
        );
    }

    #[test]
    fn model_sync_swift() {
        let path = "/repo/multi-repo-ios/multi-repo-ios/Models/ProfileModel.swift";
        let verdict = inspect(&MODEL_SCHEMA_SYNC_REMINDER, &flat(path, ""));
        let msg = verdict.diagnostic().unwrap();

        assert!(msg.starts_with("\n[schema-sync] Swift model file edited: ProfileModel.swift\n"));
        assert!(msg.contains("Kotlin model (multi-repo-android/.../data/model/)"));
        assert!(msg.contains("TypeScript types (multi-repo-nextjs/lib/database.types.ts)"));
        assert!(!msg.contains("- Swift model"));
        assert!(msg.ends_with("Run supabase-schema-validator agent to verify sync.\n"));
    }

    #[test]
    fn model_sync_kotlin_and_typescript() {
        let kotlin = "/repo/multi-repo-android/app/src/main/java/com/x/data/model/ProfileModel.kt";
        assert_eq!(Platform::detect(&flat(kotlin, "")), Some(Platform::Kotlin));

        let ts = "/repo/multi-repo-nextjs/lib/database.types.ts";
        assert_eq!(Platform::detect(&flat(ts, "")), Some(Platform::TypeScript));
        let msg = inspect(&MODEL_SCHEMA_SYNC_REMINDER, &flat(ts, ""))
            .diagnostic()
            .unwrap()
            .to_string();
        assert!(msg.contains("- Swift model"));
        assert!(msg.contains("- Kotlin model"));
        assert!(!msg.contains("- TypeScript types"));
    }

    #[test]
    fn model_sync_requires_full_shape() {
        for path in [
            "",
            // basename lacks "Model"
            "/repo/multi-repo-ios/multi-repo-ios/Models/Profile.swift",
            // wrong repo
            "/repo/other-ios/Models/ProfileModel.swift",
            // wrong directory
            "/repo/multi-repo-android/app/ui/ProfileModel.kt",
            "/repo/multi-repo-nextjs/lib/api.ts",
        ] {
            assert_eq!(
                inspect(&MODEL_SCHEMA_SYNC_REMINDER, &flat(path, "")),
                Verdict::Irrelevant,
                "{path}"
            );
        }
    }
}
