// src/bin/springscope.rs
use clap::{CommandFactory, Parser};
use colored::Colorize;
use springscope_core::cli::{self, Cli};
use springscope_core::exit::SpringscopeExit;

fn main() -> SpringscopeExit {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return SpringscopeExit::Success;
    };

    match cli::execute(&command) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            SpringscopeExit::Error
        }
    }
}
