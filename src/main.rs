//! # depfetch CLI
//!
//! Binary entry point for the `depfetch` command-line tool. It parses the
//! command line with `clap` and dispatches to a command module; errors are
//! returned from `main` so the process exits with status 1.
//!
//! All real work lives in the `depfetch` library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
