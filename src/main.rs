//! querypack - query-driven content packager
//!
//! Resolves a query against a hierarchical content store into a deduplicated
//! resource set and assembles it into a versioned package archive.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod hash;
mod operations;
mod package;
mod resource_set;
mod store;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Log to stderr so stdout only ever carries the command's result
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Package(args) => commands::package::run(args),
        Commands::Show(args) => commands::show::run(args).map(|()| ExitCode::SUCCESS),
        Commands::Version => commands::version::run().map(|()| ExitCode::SUCCESS),
        Commands::Completions(args) => commands::completions::run(args).map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
