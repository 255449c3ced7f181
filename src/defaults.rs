//! Fixed names and default values for rpg-deps.
//!
//! This module centralizes the file names the installer looks for and the
//! defaults used by the command-line front-end, so the library and the
//! commands agree on them.

/// File name of a dependency manifest, both at the project root and inside
/// every fetched repository.
pub const MANIFEST_FILE: &str = "dependencies.json";

/// Default directory, relative to the working directory, that receives clones.
pub const DEFAULT_BASE_DIR: &str = "dep";

/// Build-rule file maintained at the project root and stripped from clones.
pub const RULES_FILE: &str = "Rules.mk";

/// Marker token that prefixes the subdirectory list in [`RULES_FILE`].
pub const SUBDIRS_MARKER: &str = "subdirs: ";

/// A directory holding at least one file with this suffix is listed in
/// [`RULES_FILE`].
pub const INCLUDE_SUFFIX: &str = ".rpgleinc";

/// Editor configuration directory stripped from clones.
pub const EDITOR_DIR: &str = ".vscode";

/// Project descriptor file stripped from clones.
pub const PROJECT_DESCRIPTOR: &str = "iproj.json";

/// Version-control metadata directory stripped from clones.
pub const VCS_DIR: &str = ".git";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_ends_with_separator() {
        // The persisted line is "subdirs: a b", so the marker owns the space.
        assert!(SUBDIRS_MARKER.ends_with(' '));
        assert_eq!(SUBDIRS_MARKER.trim_end(), "subdirs:");
    }

    #[test]
    fn test_include_suffix_is_extension() {
        assert!(INCLUDE_SUFFIX.starts_with('.'));
    }
}
