//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_manifest(manifests::EMPTY);
//! fixture.command().arg("install").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::GitRepoBuilder;
    pub use super::TestFixture;
}

/// Manifest snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// No dependencies at all.
    pub const EMPTY: &str = r#"{"dependencies":{}}"#;

    /// Not JSON.
    pub const INVALID_JSON: &str = r#"{"dependencies": "#;

    /// Valid JSON without the `dependencies` key.
    pub const MISSING_KEY: &str = r#"{"deps":{}}"#;

    /// Build a manifest from `(name, url, ref)` triples.
    pub fn with_deps(deps: &[(&str, &str, &str)]) -> String {
        let entries: Vec<String> = deps
            .iter()
            .map(|(name, url, r#ref)| {
                format!(
                    r#""{}":{{"url":{},"ref":"{}"}}"#,
                    name,
                    serde_json::Value::String(url.to_string()),
                    r#ref
                )
            })
            .collect();
        format!(r#"{{"dependencies":{{{}}}}}"#, entries.join(","))
    }
}

/// A temporary project directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `dependencies.json` at the project root.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("dependencies.json", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    pub fn rules_mk(&self) -> String {
        std::fs::read_to_string(self.path().join("Rules.mk")).expect("Rules.mk should exist")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rpg-deps");
        cmd.current_dir(self.path())
            .env_remove("RPG_DEPS_MANIFEST")
            .env_remove("RPG_DEPS_BASE_DIR")
            .env_remove("RPG_DEPS_PROJECT_ROOT")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a local git repository to serve as a dependency remote.
///
/// Requires a `git` binary; only used by tests behind the
/// `integration-tests` feature.
#[allow(dead_code)]
pub struct GitRepoBuilder {
    path: PathBuf,
}

#[allow(dead_code)]
impl GitRepoBuilder {
    /// `git init` a repository at `path` on branch `main`.
    pub fn init(path: &Path) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create repo dir");
        let builder = Self {
            path: path.to_path_buf(),
        };
        builder.git(&["init", "--quiet", "--initial-branch=main"]);
        builder.git(&["config", "user.email", "test@example.com"]);
        builder.git(&["config", "user.name", "Test"]);
        builder
    }

    pub fn file(self, path: &str, content: &str) -> Self {
        let full = self.path.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(full, content).expect("Failed to write repo file");
        self
    }

    pub fn commit(self, message: &str) -> Self {
        self.git(&["add", "--all"]);
        self.git(&["commit", "--quiet", "-m", message]);
        self
    }

    pub fn tag(self, name: &str) -> Self {
        self.git(&["tag", name]);
        self
    }

    /// URL accepted by `git clone`.
    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(args)
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_manifest() {
        let fixture = TestFixture::new().with_manifest(manifests::EMPTY);
        assert!(fixture.path().join("dependencies.json").exists());
    }

    #[test]
    fn test_with_deps_is_valid_json() {
        let manifest = manifests::with_deps(&[("a", "/tmp/a", "main"), ("b", "C:\\b", "v1")]);
        let value: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(value["dependencies"]["b"]["url"], "C:\\b");
    }
}
