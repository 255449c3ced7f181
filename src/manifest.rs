//! # Dependency Manifest
//!
//! Typed loading of `dependencies.json` files. A manifest looks like:
//!
//! ```json
//! {
//!   "dependencies": {
//!     "utils": { "url": "https://example.com/utils.git", "ref": "v1.2.0" },
//!     "dates": { "url": "../dates", "ref": "main" }
//!   }
//! }
//! ```
//!
//! Dependencies are kept in document order, which is the order they are
//! fetched in. Keys other than `dependencies` are ignored.

use std::fs;
use std::path::{Component, Path};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Where and at which revision to fetch one repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoInfo {
    /// Anything `git clone` accepts: remote URL or local path.
    pub url: String,
    /// Branch, tag or commit. Use [`RepoInfo::checkout_ref`] for the value
    /// handed to git.
    pub r#ref: String,
}

impl RepoInfo {
    pub fn new(url: impl Into<String>, r#ref: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            r#ref: r#ref.into(),
        }
    }

    /// The ref with surrounding whitespace removed.
    pub fn checkout_ref(&self) -> &str {
        self.r#ref.trim()
    }
}

/// A name is joined onto the base directory and that path is deleted before
/// cloning, so it must not escape the base directory.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[derive(Deserialize)]
struct RawManifest {
    dependencies: serde_json::Map<String, serde_json::Value>,
}

/// A parsed dependency manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    dependencies: Vec<(String, RepoInfo)>,
}

impl Manifest {
    /// Parse a manifest from a JSON string.
    ///
    /// `origin` is only used to label errors.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let parse_error = |message: String| Error::ManifestParse {
            path: origin.to_path_buf(),
            message,
        };

        let raw: RawManifest =
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;

        let mut dependencies = Vec::with_capacity(raw.dependencies.len());
        for (name, value) in raw.dependencies {
            if !is_plain_name(&name) {
                return Err(parse_error(format!(
                    "dependency name '{}' must be a single directory name",
                    name
                )));
            }
            let info: RepoInfo = serde_json::from_value(value)
                .map_err(|e| parse_error(format!("dependency '{}': {}", name, e)))?;
            dependencies.push((name, info));
        }

        Ok(Self { dependencies })
    }

    /// Read and parse the manifest at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Dependencies in document order.
    pub fn dependencies(&self) -> impl Iterator<Item = (&str, &RepoInfo)> {
        self.dependencies
            .iter()
            .map(|(name, info)| (name.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
