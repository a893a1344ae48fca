use crate::reporting::shared::{duration, pluralize};
use crate::types::ScanReport;
use colored::Colorize;

/// Prints smells, cycles, snapshot dependencies and a one-line summary.
pub fn print_report(report: &ScanReport, verbose: bool) {
    if verbose {
        print_smells(report);
    }
    print_cycles(report);
    print_outdated(report);
    print_summary(report);
}

fn print_smells(report: &ScanReport) {
    for (name, record) in &report.summary {
        if record.code_smells.is_empty() {
            continue;
        }
        println!("{} {}", name.bold(), format!("({})", record.file_path.display()).dimmed());
        for smell in &record.code_smells {
            println!("  {} {smell}", "-".yellow());
        }
    }
}

fn print_cycles(report: &ScanReport) {
    for cycle in &report.cycles {
        let closing = cycle.first().map_or("", String::as_str);
        println!(
            "{} {} -> {closing}",
            "cycle:".red().bold(),
            cycle.join(" -> ")
        );
    }
}

fn print_outdated(report: &ScanReport) {
    for dep in &report.outdated_dependencies {
        println!(
            "{} {} {} ({})",
            "dependency:".yellow().bold(),
            dep.dependency,
            dep.version,
            dep.issue.dimmed()
        );
    }
}

fn print_summary(report: &ScanReport) {
    let duration = duration(report);
    let classes = report.class_count();
    let smells = report.smell_count();
    let cycles = report.cycles.len();
    let failures = report.failure_count();

    let summary = format!(
        "{classes} {}, {smells} {}, {cycles} {}, {failures} {}",
        pluralize("class", classes),
        pluralize("smell", smells),
        pluralize("cycle", cycles),
        pluralize("failure", failures),
    );

    if failures > 0 || cycles > 0 {
        println!("{} Scanned {summary} ({duration:?}).", "X".red().bold());
    } else if smells > 0 {
        println!("{} Scanned {summary} ({duration:?}).", "~".yellow().bold());
    } else {
        println!("{} Scanned {summary} ({duration:?}).", "OK".green().bold());
    }
}
