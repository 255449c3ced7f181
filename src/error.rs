//! # Error Handling
//!
//! This module defines the centralized error type for the `rpg-deps`
//! library. It uses `thiserror` to build a single `Error` enum covering every
//! failure the installer can hit, each variant carrying enough context to be
//! actionable when it reaches the terminal.
//!
//! All of these errors are fatal for a run: nothing in the library retries or
//! rolls back, with the single exception of the read-only retry inside the
//! sanitizer, which never surfaces as an `Error` when it succeeds.

use std::path::PathBuf;

use thiserror::Error;

fn render_hint(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for rpg-deps operations
#[derive(Error, Debug)]
pub enum Error {
    /// The dependency manifest could not be read from disk.
    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dependency manifest is not valid JSON or does not have the
    /// expected `dependencies` shape.
    #[error("Manifest parsing error in {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// `git clone` failed or could not be started.
    #[error("Git clone error for {name} ({url}): {message}{}", render_hint(hint))]
    GitClone {
        name: String,
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// `git checkout` failed or could not be started.
    #[error("Git checkout error for {name}@{r#ref}: {message}{}", render_hint(hint))]
    GitCheckout {
        name: String,
        r#ref: String,
        message: String,
        hint: Option<String>,
    },

    /// Removing metadata from a freshly cloned repository failed.
    #[error("Failed to remove {}: {source}", path.display())]
    Sanitize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the dependency tree for include directories failed.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
