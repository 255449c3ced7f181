//! # Install Command Implementation
//!
//! This module implements the `install` subcommand, the main entry point of
//! `rpg-deps`.
//!
//! ## Functionality
//!
//! - **Fresh base directory**: the base directory (`dep` by default) is
//!   deleted and recreated before anything is fetched. Installs are never
//!   incremental.
//! - **Recursive fetch**: every dependency in the manifest is cloned and
//!   checked out; a `dependencies.json` inside a clone is installed too. A
//!   name is fetched once per run.
//! - **Rules.mk**: once everything is fetched, the `subdirs:` directive of
//!   `Rules.mk` at the project root is refreshed.
//!
//! Any failure aborts the run immediately; there is no rollback.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use rpg_deps::defaults::{DEFAULT_BASE_DIR, MANIFEST_FILE};
use rpg_deps::installer::DependencyInstaller;
use rpg_deps::output::{OutputConfig, Progress};
use rpg_deps::repository::RepositoryFetcher;

/// Arguments for the install command
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Path to the dependency manifest
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "RPG_DEPS_MANIFEST",
        default_value = MANIFEST_FILE
    )]
    pub manifest: PathBuf,

    /// Directory that receives the clones. Deleted and recreated on every run.
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "RPG_DEPS_BASE_DIR",
        default_value = DEFAULT_BASE_DIR
    )]
    pub base_dir: PathBuf,

    /// Project root holding Rules.mk (defaults to the current directory)
    #[arg(short, long, value_name = "DIR", env = "RPG_DEPS_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the install command
pub fn execute(args: InstallArgs, color: &str) -> Result<()> {
    let start_time = Instant::now();

    if !args.manifest.exists() {
        anyhow::bail!("Manifest not found: {}", args.manifest.display());
    }

    let project_root = match args.project_root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let progress = Progress::new(OutputConfig::from_env_and_flag(color)).with_quiet(args.quiet);
    progress.step(
        "🔍",
        "[INSTALL]",
        &format!("Installing dependencies from {}", args.manifest.display()),
    );

    let installer =
        DependencyInstaller::new(RepositoryFetcher::new(), &args.base_dir, &project_root)
            .with_progress(progress.clone());

    let report = installer
        .install(&args.manifest)
        .with_context(|| format!("Failed to install {}", args.manifest.display()))?;

    progress.step(
        "✅",
        "[DONE]",
        &format!(
            "Installed {} dependencies in {:.2}s",
            report.fetched.len(),
            start_time.elapsed().as_secs_f64()
        ),
    );
    if !report.skipped.is_empty() {
        progress.detail(&format!("already fetched: {}", report.skipped.join(", ")));
    }
    progress.detail(&format!(
        "{} lists {} subdirs",
        report.rules.rules_path.display(),
        report.rules.subdirs.len()
    ));

    Ok(())
}
