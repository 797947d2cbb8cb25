//! # Entity Catalog CLI
//!
//! Binary entry point for the `entity-catalog` command-line tool.
//!
//! It parses arguments with `clap`, dispatches to the matching command and
//! reports any error on the way out. All resolution logic lives in the
//! library crate; the binary only wires it to the terminal.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
