//! gaenv - symlinked Python dependencies for sandboxed runtimes
//!
//! Reads a pip requirements file, finds the installed distributions that
//! satisfy it and links their top-level modules into one directory that the
//! application imports at startup.

use clap::Parser;
use miette::Diagnostic;

mod bootstrap;
mod cli;
mod commands;
mod config;
mod error;
mod links;
mod logging;
mod manifest;
mod reconciler;
mod registry;
mod requirement;
mod resolver;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::link::run(&cli) {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
