// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands};

use crate::exit::SpringscopeExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: &Commands) -> Result<SpringscopeExit> {
    match command {
        Commands::Scan(args) => {
            crate::logging::init(args.verbose);
            handlers::handle_scan(args)
        }
    }
}
