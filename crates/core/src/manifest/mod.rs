//! Dependency-manifest lookup for hooks that refine their verdict with the
//! version a project actually declares.
//!
//! The lookup is a trait so hooks never touch local storage directly: the CLI
//! wires in [`FsManifestLookup`], tests substitute a stub or a mock.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

/// Manifest file consulted next to (and one level above) the edited file
pub const MANIFEST_FILE: &str = "package.json";

/// Dependency tables searched inside a manifest, in order
const DEPENDENCY_TABLES: &[&str] = &["dependencies", "devDependencies"];

#[cfg_attr(test, mockall::automock)]
pub trait ManifestLookup: Send + Sync {
    /// Declared version requirement of `package` for the project containing
    /// `source_file`, or `None` when no readable manifest declares it.
    fn dependency_version(&self, source_file: &Path, package: &str) -> Option<String>;
}

/// Reads `package.json` from the edited file's directory, then its parent
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestLookup;

impl FsManifestLookup {
    pub fn new() -> Self {
        Self
    }

    /// Manifest locations checked for `source_file`, nearest first
    pub fn candidates(source_file: &Path) -> Vec<PathBuf> {
        let dir = source_file.parent().unwrap_or(Path::new(""));
        let mut candidates = vec![dir.join(MANIFEST_FILE)];
        if let Some(parent) = dir.parent() {
            candidates.push(parent.join(MANIFEST_FILE));
        }
        candidates
    }
}

impl ManifestLookup for FsManifestLookup {
    fn dependency_version(&self, source_file: &Path, package: &str) -> Option<String> {
        for path in Self::candidates(source_file) {
            if !path.is_file() {
                continue;
            }
            match load_manifest(&path) {
                // First readable manifest decides, even when it omits the package
                Ok(manifest) => return declared_version(&manifest, package),
                Err(e) => {
                    debug!("Skipping unreadable manifest {}: {}", path.display(), e);
                }
            }
        }
        None
    }
}

/// Fixed answer regardless of path
#[derive(Debug, Clone, Default)]
pub struct StaticManifestLookup {
    version: Option<String>,
}

impl StaticManifestLookup {
    pub fn new(version: Option<&str>) -> Self {
        Self {
            version: version.map(str::to_string),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl ManifestLookup for StaticManifestLookup {
    fn dependency_version(&self, _source_file: &Path, _package: &str) -> Option<String> {
        self.version.clone()
    }
}

fn load_manifest(path: &Path) -> crate::Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Version string for `package` in the first dependency table declaring it.
/// Empty strings count as undeclared.
pub fn declared_version(manifest: &Value, package: &str) -> Option<String> {
    DEPENDENCY_TABLES
        .iter()
        .filter_map(|table| manifest.get(table)?.get(package)?.as_str())
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Major version named by a semver requirement such as `^4.1.0`, `~3.22`,
/// `>=4`, or `v4`. Returns `None` for tags like `latest` or `workspace:*`.
pub fn major_version(requirement: &str) -> Option<u64> {
    let trimmed = requirement
        .trim()
        .trim_start_matches(['^', '~', '=', '>', '<', 'v', ' ']);
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
