// src/cli/handlers.rs
use crate::analysis::Scanner;
use crate::cli::args::{OutputFormat, ScanArgs};
use crate::config::{io, ScanConfig};
use crate::exit::SpringscopeExit;
use crate::reporting;
use anyhow::{Context, Result};
use colored::Colorize;

fn load_config(args: &ScanArgs) -> ScanConfig {
    let mut config = match &args.config {
        Some(path) => io::load_or_default(path),
        None => ScanConfig::load(&args.project_dir),
    };
    args.apply_overrides(&mut config);
    config
}

/// Handles the scan command.
///
/// # Errors
/// Returns error if the project holds no Java files, the configuration is
/// invalid, or reports cannot be written.
pub fn handle_scan(args: &ScanArgs) -> Result<SpringscopeExit> {
    let config = load_config(args);
    let scanner = Scanner::new(config);
    let report = scanner
        .scan(&args.project_dir)
        .with_context(|| format!("scan of {} failed", args.project_dir.display()))?;

    match args.format {
        OutputFormat::Prompt => {
            print!("{}", reporting::architecture_prompt(&report.summary));
        }
        OutputFormat::Json => {
            let dir = args.output.as_deref().unwrap_or(&args.project_dir);
            let written = reporting::write_json(dir, &args.project_dir, &report)
                .context("Cannot write to the specified output directory")?;
            reporting::write_summary(dir, &scanner.config().output_file, &report)?;
            reporting::print_report(&report, args.verbose);
            println!(
                "{} {}",
                "Reports:".dimmed(),
                written.combined.parent().unwrap_or(dir).display()
            );
        }
    }

    if report.failure_count() > 0 {
        Ok(SpringscopeExit::PartialScan)
    } else {
        Ok(SpringscopeExit::Success)
    }
}
