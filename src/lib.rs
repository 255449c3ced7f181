//! # rpg-deps
//!
//! Recursive dependency fetcher for RPG projects. A `dependencies.json`
//! manifest names git repositories and the ref to use for each; `rpg-deps`
//! clones them into a base directory, strips their project metadata, follows
//! nested manifests, and records every directory that holds `.rpgleinc`
//! include files in the `subdirs:` directive of the project's `Rules.mk`.
//!
//! ## Quick Example
//!
//! ```
//! use rpg_deps::rules::SubdirsList;
//!
//! let mut subdirs = SubdirsList::parse("subdirs: qrpglesrc");
//! subdirs.insert("dep/utils/inc");
//! subdirs.insert("qrpglesrc");
//! assert_eq!(subdirs.render(), "subdirs: qrpglesrc dep/utils/inc");
//! ```
//!
//! ## Modules
//!
//! - **`manifest`**: typed loading of `dependencies.json`.
//! - **`git`**, **`repository`**: clone and checkout through the `git`
//!   binary, behind the `GitOperations` trait.
//! - **`sanitize`**: removal of `.vscode`, `iproj.json`, `Rules.mk` and `.git`
//!   from each clone.
//! - **`rules`**: discovery of include directories and the `Rules.mk` update.
//! - **`installer`**: the recursive orchestration tying it all together.

pub mod defaults;
pub mod error;
pub mod git;
pub mod installer;
pub mod manifest;
pub mod output;
pub mod repository;
pub mod rules;
pub mod sanitize;
