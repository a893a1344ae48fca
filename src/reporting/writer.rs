// src/reporting/writer.rs
//! JSON report files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::views;
use crate::error::{Result, ScanError};
use crate::types::ScanReport;

pub const CODE_ANALYSIS: &str = "code_analysis.json";
pub const DATA_ANALYSIS: &str = "data_analysis.json";
pub const COMBINED_ANALYSIS: &str = "combined_analysis.json";

const PROBE_FILE: &str = "test_write.txt";

/// Paths of the files written by [`write_json`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub code: PathBuf,
    pub data: PathBuf,
    pub combined: PathBuf,
}

/// Fails early if `dir` does not accept writes.
///
/// # Errors
/// Returns `ScanError::Io` naming the probe file.
pub fn probe_writable(dir: &Path) -> Result<()> {
    let probe = dir.join(PROBE_FILE);
    fs::write(&probe, "Test write to verify permissions.").map_err(|e| ScanError::io(e, &probe))?;
    fs::remove_file(&probe).map_err(|e| ScanError::io(e, &probe))?;
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| ScanError::io(e, path))?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}

/// Writes the structure, integration and combined views into `dir`.
/// File paths in the structure and combined views are made relative to `project_root`.
///
/// # Errors
/// Returns error if `dir` is not writable or serialization fails.
pub fn write_json(dir: &Path, project_root: &Path, report: &ScanReport) -> Result<WrittenReports> {
    probe_writable(dir)?;

    let written = WrittenReports {
        code: dir.join(CODE_ANALYSIS),
        data: dir.join(DATA_ANALYSIS),
        combined: dir.join(COMBINED_ANALYSIS),
    };

    let structure = views::structure_view(&report.summary, project_root);
    write_file(&written.code, &to_json(&structure)?)?;

    let integration = views::integration_view(&report.summary);
    write_file(&written.data, &to_json(&integration)?)?;

    let combined = views::combined(&report.summary, project_root);
    write_file(&written.combined, &to_json(&combined)?)?;

    Ok(written)
}

/// Writes the whole report (records, cycles, stats, flagged dependencies)
/// to `dir/file_name`.
///
/// # Errors
/// Returns error if the file cannot be written or serialization fails.
pub fn write_summary(dir: &Path, file_name: &str, report: &ScanReport) -> Result<PathBuf> {
    let path = dir.join(file_name);
    write_file(&path, &to_json(report)?)?;
    Ok(path)
}
