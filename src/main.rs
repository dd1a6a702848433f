//! # OCS Quickstart CLI
//!
//! This is the binary entry point for the `ocs-quickstart` command-line tool.
//!
//! It parses the command line with `clap`, sets up logging, and hands off
//! to the library's provisioning pipeline. Any fatal step surfaces here as an
//! error and a non-zero exit code.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
