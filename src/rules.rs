//! # Rules.mk Subdirectory List
//!
//! The downstream build reads a single directive from `Rules.mk` at the
//! project root:
//!
//! ```text
//! subdirs: dep/utils/qrpgleref dep/dates/src
//! ```
//!
//! [`update_rules_file`] keeps that directive in sync with the fetched
//! dependencies. It runs in two phases:
//!
//! 1.  **Discovery** ([`include_dirs`]): a lazy walk of the base directory
//!     yielding each directory that holds at least one `*.rpgleinc` file.
//!     Nothing is written during this phase.
//! 2.  **Merge and write**: discovered directories are made relative to the
//!     project root, appended to the entries already in the file when not
//!     present yet, and the file is rewritten as one line.
//!
//! The walk is sorted by file name and existing entries are never reordered,
//! so running the update twice over the same tree produces the same bytes.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::defaults::{INCLUDE_SUFFIX, RULES_FILE, SUBDIRS_MARKER};
use crate::error::Result;

/// Ordered, duplicate-free list of project-relative directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubdirsList {
    entries: Vec<String>,
}

impl SubdirsList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the list from `Rules.mk` content.
    ///
    /// The value runs from the first marker to the next marker occurrence or
    /// the end of the content. Content without the marker yields an empty
    /// list.
    pub fn parse(content: &str) -> Self {
        let mut list = Self::new();
        if let Some(value) = content.split(SUBDIRS_MARKER).nth(1) {
            for entry in value.split_whitespace() {
                list.insert(entry);
            }
        }
        list
    }

    /// Append `entry` unless it is already listed. Returns whether it was
    /// added.
    pub fn insert(&mut self, entry: &str) -> bool {
        if self.contains(entry) {
            return false;
        }
        self.entries.push(entry.to_string());
        true
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The persisted form: marker followed by the space-joined entries.
    pub fn render(&self) -> String {
        format!("{}{}", SUBDIRS_MARKER, self.entries.join(" "))
    }
}

/// Result of a [`update_rules_file`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Path of the `Rules.mk` that was written.
    pub rules_path: PathBuf,
    /// Full list as written.
    pub subdirs: SubdirsList,
    /// Entries that were not in the file before this run.
    pub added: Vec<String>,
}

/// Lazily yield every directory under `base_dir` that directly contains a
/// file whose name ends with [`INCLUDE_SUFFIX`].
///
/// A directory is yielded once per matching file; callers deduplicate. Within
/// a directory, files are visited before subdirectories, each group sorted by
/// file name, so a directory always comes before its descendants. Symlinks to
/// files count as files. A missing `base_dir` yields nothing.
pub fn include_dirs(base_dir: &Path) -> impl Iterator<Item = Result<PathBuf>> {
    let walker = base_dir.exists().then(|| {
        WalkDir::new(base_dir)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
    });

    walker.into_iter().flatten().filter_map(|entry| match entry {
        Ok(entry) => {
            let is_include = is_file_like(&entry)
                && entry.file_name().to_string_lossy().ends_with(INCLUDE_SUFFIX);
            if is_include {
                entry.path().parent().map(|dir| Ok(dir.to_path_buf()))
            } else {
                None
            }
        }
        Err(e) => Some(Err(e.into())),
    })
}

/// Anything the walk does not descend into, except links to directories.
fn is_file_like(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return false;
    }
    !(entry.path_is_symlink() && entry.path().is_dir())
}

/// Refresh the `subdirs:` directive of `<project_root>/Rules.mk` with the
/// include directories found under `base_dir`.
///
/// Creates the file with an empty directive when it does not exist. Entries
/// already in the file are kept in place; new ones are appended in walk
/// order.
pub fn update_rules_file(project_root: &Path, base_dir: &Path) -> Result<UpdateSummary> {
    let rules_path = project_root.join(RULES_FILE);
    if !rules_path.exists() {
        debug!("Creating {}", rules_path.display());
        fs::write(&rules_path, SUBDIRS_MARKER)?;
    }

    let content = fs::read_to_string(&rules_path)?;
    let mut subdirs = SubdirsList::parse(&content);

    let root = std::path::absolute(project_root)?;
    let mut added = Vec::new();
    for dir in include_dirs(base_dir) {
        let dir = std::path::absolute(dir?)?;
        let relative = relative_path(&dir, &root);
        if subdirs.insert(&relative) {
            debug!("New include directory: {}", relative);
            added.push(relative);
        }
    }

    fs::write(&rules_path, subdirs.render())?;
    info!(
        "Wrote {} with {} subdirs ({} new)",
        rules_path.display(),
        subdirs.len(),
        added.len()
    );

    Ok(UpdateSummary {
        rules_path,
        subdirs,
        added,
    })
}

/// Express `path` relative to `base`, both absolute, joined with `/`.
///
/// Returns `.` when they are the same directory.
pub fn relative_path(path: &Path, base: &Path) -> String {
    let path = normalize(path);
    let base = normalize(base);

    let common = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let parts: Vec<String> = std::iter::repeat("..".to_string())
        .take(base.len() - common)
        .chain(path[common..].iter().cloned())
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    parts
}
