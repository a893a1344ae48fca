// tests/reporting.rs
//! JSON report files and the architecture prompt.

use springscope_core::analysis::{build_record, Scanner};
use springscope_core::ast::{AnnotationRef, ClassDecl, FieldDecl, TypeRef};
use springscope_core::config::ScanConfig;
use springscope_core::reporting::{self, prompt};
use springscope_core::types::ScanReport;
use std::fs;
use std::time::SystemTime;

fn report_for(root: &std::path::Path) -> ScanReport {
    let mut service = ClassDecl::new("BookingService");
    service.annotations.push(AnnotationRef::bare("Service"));

    let mut entity = ClassDecl::new("Booking");
    entity.annotations.push(AnnotationRef::bare("Entity"));
    entity.fields.push(FieldDecl {
        ty: Some(TypeRef::named("String")),
        declarators: vec!["reference".into()],
        ..FieldDecl::default()
    });

    let config = ScanConfig::default();
    let mut report = ScanReport::default();
    for (class, rel) in [
        (&service, "booking/service/BookingService.java"),
        (&entity, "booking/entity/Booking.java"),
    ] {
        let record = build_record(class, &root.join(rel), SystemTime::UNIX_EPOCH, &config);
        report.summary.insert(class.name.clone(), record);
    }
    report
}

#[test]
fn test_three_reports_with_relative_paths() -> anyhow::Result<()> {
    let out = tempfile::tempdir()?;
    let root = std::path::Path::new("/work/airline");
    let written = reporting::write_json(out.path(), root, &report_for(root))?;

    let code: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written.code)?)?;
    assert_eq!(
        code["BookingService"]["file_path"],
        "booking/service/BookingService.java"
    );
    assert_eq!(code["BookingService"]["component_type"], "Service");
    assert_eq!(code["BookingService"]["layer"], "Service Layer");
    assert!(code["BookingService"].get("methods").is_none());
    assert!(code["BookingService"].get("code_smells").is_none());

    let data: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written.data)?)?;
    assert_eq!(data["Booking"]["bounded_context"], "Booking Context");
    assert!(data["Booking"]["database_entities"].is_array());
    assert!(data["BookingService"].get("database_entities").is_none());

    let combined: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written.combined)?)?;
    assert_eq!(combined["Booking"]["code_smells"][0], "Data Class");
    assert_eq!(combined["Booking"]["domain"], "Booking Domain");
    Ok(())
}

#[test]
fn test_reports_are_indented_four_spaces() -> anyhow::Result<()> {
    let out = tempfile::tempdir()?;
    let root = std::path::Path::new("/work/airline");
    let written = reporting::write_json(out.path(), root, &report_for(root))?;
    let text = fs::read_to_string(written.code)?;
    assert!(text.starts_with("{\n    \"Booking\""));
    Ok(())
}

#[test]
fn test_unwritable_output_fails() {
    let result = reporting::write_json(
        std::path::Path::new("/definitely/missing/output"),
        std::path::Path::new("/"),
        &ScanReport::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_prompt_lists_every_class() {
    let report = report_for(std::path::Path::new("/work/airline"));
    let text = reporting::architecture_prompt(&report.summary);
    assert!(text.contains("BookingService"));
    assert!(text.contains("Component Type: Service"));
    assert!(text.contains("Layer: Entity Layer"));
    assert!(prompt::estimate_tokens(&text) > 0);
}

#[test]
fn test_prompt_truncates_at_limit() {
    let report = report_for(std::path::Path::new("/work/airline"));
    let full = reporting::architecture_prompt(&report.summary);
    let short = prompt::architecture_prompt_with_limit(&report.summary, 10);
    assert!(short.len() < full.len());
}

#[test]
fn test_scanner_output_feeds_writer() -> anyhow::Result<()> {
    let project = tempfile::tempdir()?;
    fs::write(
        project.path().join("Plain.java"),
        "public class Plain { int size() { return 1; } }",
    )?;
    let report = Scanner::new(ScanConfig::default()).scan(project.path())?;
    let written = reporting::write_json(project.path(), project.path(), &report)?;
    let code: serde_json::Value = serde_json::from_str(&fs::read_to_string(written.code)?)?;
    assert_eq!(code["Plain"]["file_path"], "Plain.java");
    assert_eq!(code["Plain"]["methods_complexity"]["size"], 1);
    Ok(())
}
