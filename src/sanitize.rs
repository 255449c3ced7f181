//! # Clone Sanitizer
//!
//! A vendored dependency should look like plain source: no editor settings,
//! no project descriptor, no build rules of its own and no git metadata.
//! [`sanitize`] strips those from a freshly cloned repository.
//!
//! Git marks pack files and objects read-only, which makes a plain recursive
//! delete of `.git` fail on some platforms. The metadata directory is
//! therefore removed with [`remove_dir_all_forced`], which clears the
//! read-only attribute of a path that refuses to go away and tries once more.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::defaults::{EDITOR_DIR, PROJECT_DESCRIPTOR, RULES_FILE, VCS_DIR};
use crate::error::{Error, Result};

/// One entry removed from a clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stripped {
    EditorConfig,
    ProjectDescriptor,
    BuildRules,
    VcsMetadata,
}

impl Stripped {
    /// Name of the entry relative to the repository root.
    pub fn file_name(self) -> &'static str {
        match self {
            Stripped::EditorConfig => EDITOR_DIR,
            Stripped::ProjectDescriptor => PROJECT_DESCRIPTOR,
            Stripped::BuildRules => RULES_FILE,
            Stripped::VcsMetadata => VCS_DIR,
        }
    }
}

/// Remove editor, project, build-rule and git metadata from `repo_dir`.
///
/// Missing entries are skipped. Returns what was actually removed, in
/// removal order.
pub fn sanitize(repo_dir: &Path) -> Result<Vec<Stripped>> {
    let mut removed = Vec::new();

    for entry in [
        Stripped::EditorConfig,
        Stripped::ProjectDescriptor,
        Stripped::BuildRules,
        Stripped::VcsMetadata,
    ] {
        let path = repo_dir.join(entry.file_name());
        // symlink_metadata so a dangling link still counts as present
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => return Err(Error::Sanitize { path, source }),
        };

        debug!("Removing {}", path.display());
        let outcome = match entry {
            Stripped::VcsMetadata => remove_dir_all_forced(&path),
            _ if metadata.is_dir() => fs::remove_dir_all(&path),
            _ => fs::remove_file(&path),
        };
        outcome.map_err(|source| Error::Sanitize {
            path: path.clone(),
            source,
        })?;

        removed.push(entry);
    }

    Ok(removed)
}

/// Recursively delete `path`, retrying once on permission errors.
///
/// When removing (or listing) an entry fails with
/// [`io::ErrorKind::PermissionDenied`], the read-only attribute is cleared on
/// that entry and the operation is retried. A second failure is returned.
pub fn remove_dir_all_forced(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;

    if metadata.is_dir() {
        let entries = retry_writable(path, || {
            fs::read_dir(path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<io::Result<Vec<PathBuf>>>()
        })?;
        for child in entries {
            remove_dir_all_forced(&child)?;
        }
        retry_writable(path, || fs::remove_dir(path))
    } else {
        retry_writable(path, || fs::remove_file(path))
    }
}

fn retry_writable<T>(path: &Path, mut op: impl FnMut() -> io::Result<T>) -> io::Result<T> {
    match op() {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!(
                "Permission denied on {}, clearing read-only flag and retrying",
                path.display()
            );
            make_writable(path)?;
            op()
        }
        other => other,
    }
}

#[cfg(unix)]
fn make_writable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fn grant_owner_rwx(path: &Path) -> io::Result<()> {
        let mut perms = fs::symlink_metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o700);
        fs::set_permissions(path, perms)
    }

    // Unlinking on Unix is governed by the parent directory's mode.
    if let Some(parent) = path.parent() {
        grant_owner_rwx(parent)?;
    }
    if !fs::symlink_metadata(path)?.file_type().is_symlink() {
        grant_owner_rwx(path)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn make_writable(path: &Path) -> io::Result<()> {
    let mut perms = fs::symlink_metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    fs::set_permissions(path, perms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populated_clone(root: &Path) {
        fs::create_dir_all(root.join(".vscode")).unwrap();
        fs::write(root.join(".vscode/settings.json"), "{}").unwrap();
        fs::write(root.join("iproj.json"), "{}").unwrap();
        fs::write(root.join("Rules.mk"), "subdirs: x").unwrap();
        fs::create_dir_all(root.join(".git/objects/ab")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(root.join(".git/objects/ab/cdef"), b"blob").unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/util.rpgleinc"), "**free").unwrap();
    }

    fn set_readonly(path: &Path) {
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(path, perms).unwrap();
    }

    #[test]
    fn test_sanitize_removes_all_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        populated_clone(root);

        let removed = sanitize(root).unwrap();

        assert_eq!(
            removed,
            vec![
                Stripped::EditorConfig,
                Stripped::ProjectDescriptor,
                Stripped::BuildRules,
                Stripped::VcsMetadata,
            ]
        );
        assert!(!root.join(".vscode").exists());
        assert!(!root.join("iproj.json").exists());
        assert!(!root.join("Rules.mk").exists());
        assert!(!root.join(".git").exists());
        // Regular sources survive
        assert!(root.join("src/util.rpgleinc").exists());
    }

    #[test]
    fn test_sanitize_tolerates_missing_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("iproj.json"), "{}").unwrap();

        let removed = sanitize(root).unwrap();

        assert_eq!(removed, vec![Stripped::ProjectDescriptor]);
    }

    #[cfg(unix)]
    #[test]
    fn test_sanitize_reports_unreadable_entries() {
        let temp_dir = TempDir::new().unwrap();
        // Every lookup below a regular file fails with something other than NotFound
        let not_a_dir = temp_dir.path().join("file");
        fs::write(&not_a_dir, "").unwrap();

        let err = sanitize(&not_a_dir).unwrap_err();
        match err {
            Error::Sanitize { path, source } => {
                assert_eq!(path, not_a_dir.join(".vscode"));
                assert_ne!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("Expected Sanitize, got {:?}", other),
        }
    }

    #[test]
    fn test_sanitize_missing_repo_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let removed = sanitize(&temp_dir.path().join("gone")).unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn test_sanitize_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(sanitize(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_sanitize_removes_readonly_git_objects() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        populated_clone(root);
        set_readonly(&root.join(".git/objects/ab/cdef"));
        set_readonly(&root.join(".git/HEAD"));

        sanitize(root).unwrap();

        assert!(!root.join(".git").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_forced_readonly_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let git_dir = temp_dir.path().join(".git");
        let pack_dir = git_dir.join("objects/pack");
        fs::create_dir_all(&pack_dir).unwrap();
        fs::write(pack_dir.join("pack-1.idx"), b"idx").unwrap();
        fs::write(pack_dir.join("pack-1.pack"), b"pack").unwrap();
        set_readonly(&pack_dir.join("pack-1.idx"));
        // Entries of a read-only directory cannot be unlinked by a regular user
        fs::set_permissions(&pack_dir, fs::Permissions::from_mode(0o555)).unwrap();

        remove_dir_all_forced(&git_dir).unwrap();

        assert!(!git_dir.exists());
    }

    #[test]
    fn test_remove_forced_missing_path_errors() {
        let temp_dir = TempDir::new().unwrap();
        let err = remove_dir_all_forced(&temp_dir.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_retry_writable_retries_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file");
        fs::write(&path, "x").unwrap();

        let mut calls = 0;
        let result: io::Result<()> = retry_writable(&path, || {
            calls += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
        });

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_retry_writable_does_not_retry_other_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut calls = 0;
        let result: io::Result<()> = retry_writable(temp_dir.path(), || {
            calls += 1;
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_stripped_file_names() {
        assert_eq!(Stripped::EditorConfig.file_name(), ".vscode");
        assert_eq!(Stripped::ProjectDescriptor.file_name(), "iproj.json");
        assert_eq!(Stripped::BuildRules.file_name(), "Rules.mk");
        assert_eq!(Stripped::VcsMetadata.file_name(), ".git");
    }
}
