//! # Repository Fetching
//!
//! This module turns one manifest entry into a clean vendored copy under the
//! base directory: delete whatever is at `<base_dir>/<name>`, clone, check out
//! the requested ref, then strip metadata with [`crate::sanitize`].
//!
//! ## Design
//!
//! Git access goes through the [`GitOperations`] trait. The application uses
//! [`DefaultGitOperations`], which shells out to the `git` binary; tests swap
//! in a double that materializes repositories on disk so the fetch and install
//! logic can be exercised without git or a network.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::manifest::RepoInfo;
use crate::output::Progress;
use crate::sanitize::{self, Stripped};

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clone `url` into `target_dir`, which must not exist yet.
    ///
    /// `name` is the manifest key, used for error reporting.
    fn clone_repo(&self, name: &str, url: &str, target_dir: &Path) -> Result<()>;

    /// Check out `ref_name` inside the clone at `repo_dir`.
    fn checkout(&self, name: &str, repo_dir: &Path, ref_name: &str) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_repo(&self, name: &str, url: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone(name, url, target_dir)
    }

    fn checkout(&self, name: &str, repo_dir: &Path, ref_name: &str) -> Result<()> {
        crate::git::checkout(name, repo_dir, ref_name)
    }
}

/// A repository that has been cloned, checked out and sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedRepo {
    pub name: String,
    pub path: PathBuf,
    /// Metadata entries removed after checkout.
    pub stripped: Vec<Stripped>,
}

/// Fetches single repositories into a base directory.
pub struct RepositoryFetcher {
    git_ops: Box<dyn GitOperations>,
}

impl RepositoryFetcher {
    /// Creates a fetcher backed by the system `git` command.
    pub fn new() -> Self {
        Self::with_operations(Box::new(DefaultGitOperations))
    }

    /// Creates a fetcher with a custom `GitOperations` implementation.
    pub fn with_operations(git_ops: Box<dyn GitOperations>) -> Self {
        Self { git_ops }
    }

    /// Ensure a fresh, sanitized clone of `info` exists at
    /// `<base_dir>/<name>`.
    ///
    /// Any existing directory at that path is deleted first; there is no
    /// update in place. A clone failure returns before checkout and sanitize
    /// run.
    pub fn fetch(
        &self,
        name: &str,
        info: &RepoInfo,
        base_dir: &Path,
        progress: &Progress,
    ) -> Result<FetchedRepo> {
        let repo_path = base_dir.join(name);

        if repo_path.exists() {
            progress.step(
                "🗑️ ",
                "[DEL]",
                &format!("Removing existing {}", repo_path.display()),
            );
            fs::remove_dir_all(&repo_path)?;
        }

        progress.step("📥", "[CLONE]", &format!("Cloning {} from {}", name, info.url));
        self.git_ops.clone_repo(name, &info.url, &repo_path)?;

        let ref_name = info.checkout_ref();
        progress.step("🔀", "[CHECKOUT]", &format!("Checking out {} for {}", ref_name, name));
        self.git_ops.checkout(name, &repo_path, ref_name)?;

        let stripped = sanitize::sanitize(&repo_path)?;
        for entry in &stripped {
            progress.detail(&format!("removed {}", entry.file_name()));
        }

        info!("Fetched {} at {}", name, ref_name);
        progress.step("✅", "[OK]", &format!("{} is ready", name));

        Ok(FetchedRepo {
            name: name.to_string(),
            path: repo_path,
            stripped,
        })
    }
}

impl Default for RepositoryFetcher {
    fn default() -> Self {
        Self::new()
    }
}
