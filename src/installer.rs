//! # Dependency Installer
//!
//! Orchestrates a full install:
//!
//! 1.  Delete and recreate the base directory.
//! 2.  Fetch every dependency of the root manifest that has not been fetched
//!     yet in this run (see [`RepositoryFetcher`]).
//! 3.  After each fetch, look for a `dependencies.json` at the root of the new
//!     clone and install it recursively into the same base directory.
//! 4.  Refresh the `subdirs:` directive of the project's `Rules.mk`.
//!
//! The [`ProcessedSet`] is threaded through the recursion by mutable
//! reference. A name is fetched at most once per run, so self-references and
//! cycles between nested manifests terminate.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::defaults::MANIFEST_FILE;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::output::Progress;
use crate::repository::RepositoryFetcher;
use crate::rules::{self, UpdateSummary};

/// Names fetched so far in one run, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct ProcessedSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Record `name`. Returns false when it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if !self.seen.insert(name.to_string()) {
            return false;
        }
        self.order.push(name.to_string());
        true
    }

    /// Fetched names in the order they were first recorded.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Outcome of [`DependencyInstaller::install`].
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Every dependency fetched, in fetch order.
    pub fetched: Vec<String>,
    /// Manifest references skipped because the name was already fetched.
    pub skipped: Vec<String>,
    /// Result of the final `Rules.mk` refresh.
    pub rules: UpdateSummary,
}

/// Installs a manifest and its nested manifests into a base directory.
pub struct DependencyInstaller {
    fetcher: RepositoryFetcher,
    base_dir: PathBuf,
    project_root: PathBuf,
    progress: Progress,
}

impl DependencyInstaller {
    pub fn new(
        fetcher: RepositoryFetcher,
        base_dir: impl Into<PathBuf>,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            base_dir: base_dir.into(),
            project_root: project_root.into(),
            progress: Progress::quiet(),
        }
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Run a complete install starting from `manifest_path`.
    ///
    /// The base directory is wiped first, so a previous or concurrent install
    /// into it is discarded. `Rules.mk` is refreshed once at the end.
    pub fn install(&self, manifest_path: &Path) -> Result<InstallReport> {
        self.reset_base_dir()?;

        let mut processed = ProcessedSet::new();
        let mut skipped = Vec::new();
        self.install_nested(manifest_path, &mut processed, &mut skipped)?;

        self.progress.step(
            "📝",
            "[RULES]",
            &format!("Updating {}", self.project_root.join(crate::defaults::RULES_FILE).display()),
        );
        let rules = rules::update_rules_file(&self.project_root, &self.base_dir)?;
        for added in &rules.added {
            self.progress.detail(&format!("added {}", added));
        }

        Ok(InstallReport {
            fetched: processed.names().to_vec(),
            skipped,
            rules,
        })
    }

    /// Install the dependencies of `manifest_path` that are not in
    /// `processed` yet, recursing into nested manifests.
    ///
    /// Does not touch the base directory beyond creating it, and does not
    /// refresh `Rules.mk`.
    pub fn install_nested(
        &self,
        manifest_path: &Path,
        processed: &mut ProcessedSet,
        skipped: &mut Vec<String>,
    ) -> Result<()> {
        let manifest = Manifest::from_file(manifest_path)?;
        info!(
            "Installing {} dependencies from {}",
            manifest.len(),
            manifest_path.display()
        );

        fs::create_dir_all(&self.base_dir)?;

        for (name, repo_info) in manifest.dependencies() {
            if processed.contains(name) {
                debug!("{} already fetched, skipping", name);
                skipped.push(name.to_string());
                continue;
            }

            let fetched = self
                .fetcher
                .fetch(name, repo_info, &self.base_dir, &self.progress)?;
            processed.insert(name);

            let nested = fetched.path.join(MANIFEST_FILE);
            if nested.is_file() {
                self.progress.step(
                    "🔗",
                    "[NESTED]",
                    &format!("Installing nested dependencies of {}", name),
                );
                self.install_nested(&nested, processed, skipped)?;
            }
        }

        Ok(())
    }

    fn reset_base_dir(&self) -> Result<()> {
        if self.base_dir.exists() {
            self.progress.step(
                "🗑️ ",
                "[DEL]",
                &format!("Removing base directory {}", self.base_dir.display()),
            );
            fs::remove_dir_all(&self.base_dir)?;
        }
        fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }
}
