//! Burrow CLI
//!
//! Launches a program inside a fresh set of Linux namespaces and mirrors its
//! exit status to the caller.

use clap::Parser;
use std::process;
use tracing::Level;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the command
    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Namespaces { pid } => commands::namespaces::execute(pid),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            process::exit(burrow_launch::EXIT_LAUNCH_FAILED);
        }
    }
}
