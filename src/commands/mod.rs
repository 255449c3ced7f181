//! # CLI Command Implementations
//!
//! Each subcommand of `rpg-deps` lives in its own module with an `Args`
//! struct derived with `clap` and an `execute` function that calls into the
//! `rpg_deps` library.

pub mod completions;
pub mod install;
pub mod subdirs;
