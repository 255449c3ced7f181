//! # rpg-deps CLI
//!
//! Binary entry point. Parses arguments with `clap`, sets up logging and
//! dispatches to the command implementations. All real work lives in the
//! `rpg_deps` library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
