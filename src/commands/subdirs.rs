//! # Subdirs Command Implementation
//!
//! Refreshes the `subdirs:` directive of `Rules.mk` from what is currently in
//! the base directory, without fetching anything. Useful after editing a
//! vendored dependency by hand or after restoring `dep/` from an archive.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use rpg_deps::defaults::{DEFAULT_BASE_DIR, RULES_FILE};
use rpg_deps::output::{OutputConfig, Progress};
use rpg_deps::rules;

/// Arguments for the subdirs command
#[derive(Args, Debug)]
pub struct SubdirsArgs {
    /// Directory to scan for include directories
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

/// Execute the subdirs command
pub fn execute(args: SubdirsArgs, color: &str) -> Result<()> {
    let project_root = match args.project_root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let progress = Progress::new(OutputConfig::from_env_and_flag(color)).with_quiet(args.quiet);

    let summary = rules::update_rules_file(&project_root, &args.base_dir).with_context(|| {
        format!(
            "Failed to update {}",
            project_root.join(RULES_FILE).display()
        )
    })?;

    if summary.added.is_empty() {
        progress.step(
            "✅",
            "[OK]",
            &format!("{} is up to date", summary.rules_path.display()),
        );
    } else {
        progress.step(
            "📝",
            "[RULES]",
            &format!(
                "Added {} subdirs to {}",
                summary.added.len(),
                summary.rules_path.display()
            ),
        );
        for added in &summary.added {
            progress.detail(added);
        }
    }

    Ok(())
}
