// src/reporting/prompt.rs
//! Plain-text architecture overview for pasting into an LLM context.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::types::ClassRecord;

/// Hard cap on the estimated size of the prompt.
pub const MAX_TOKENS: usize = 5_000_000;

const HEADER: &str = "### Enhanced Java Spring Boot Project Architecture Overview ###\n\n";
const TRUNCATED: &str = "\n...Output truncated to stay within token limit...\n";

/// Rough token estimate: four characters per token.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / 4
}

#[must_use]
pub fn architecture_prompt(summary: &BTreeMap<String, ClassRecord>) -> String {
    architecture_prompt_with_limit(summary, MAX_TOKENS)
}

/// Renders classes in name order until the estimate reaches `max_tokens`.
#[must_use]
pub fn architecture_prompt_with_limit(
    summary: &BTreeMap<String, ClassRecord>,
    max_tokens: usize,
) -> String {
    let mut out = String::from(HEADER);

    for (name, record) in summary {
        if estimate_tokens(&out) >= max_tokens {
            out.push_str(TRUNCATED);
            break;
        }
        render_class(&mut out, name, record);
    }
    out
}

fn render_class(out: &mut String, name: &str, record: &ClassRecord) {
    let _ = writeln!(out, "Class: {name}");
    let _ = writeln!(out, "Component Type: {}", record.component_type);
    let _ = writeln!(out, "Layer: {}", record.layer);
    let _ = writeln!(out, "Bounded Context: {}", record.bounded_context);

    let annotations = if record.annotations.is_empty() {
        "None".to_string()
    } else {
        record
            .annotations
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let _ = writeln!(out, "Annotations: {annotations}");

    let smells = if record.code_smells.is_empty() {
        "None".to_string()
    } else {
        record
            .code_smells
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let _ = writeln!(out, "Code Smells: {smells}");

    if !record.relationships.is_empty() {
        out.push_str("Relationships:\n");
        for rel in &record.relationships {
            let _ = writeln!(
                out,
                "  - {} {} ({})",
                rel.kind.as_str(),
                rel.target,
                rel.relationship_type
            );
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_record;
    use crate::ast::{AnnotationRef, ClassDecl, TypeRef};
    use crate::config::ScanConfig;
    use std::path::Path;
    use std::time::SystemTime;

    fn summary(names: &[&str]) -> BTreeMap<String, ClassRecord> {
        names
            .iter()
            .map(|n| {
                let mut class = ClassDecl::new(n);
                class.annotations.push(AnnotationRef::bare("Service"));
                class.extends = Some(TypeRef::named("BaseService"));
                let record = build_record(
                    &class,
                    Path::new("src/App.java"),
                    SystemTime::UNIX_EPOCH,
                    &ScanConfig::default(),
                );
                ((*n).to_string(), record)
            })
            .collect()
    }

    #[test]
    fn test_renders_class_block() {
        let text = architecture_prompt(&summary(&["Billing"]));
        assert!(text.starts_with(HEADER));
        assert!(text.contains("Class: Billing\nComponent Type: Service\n"));
        assert!(text.contains("Annotations: Service\n"));
        assert!(text.contains("Code Smells: None\n"));
        assert!(text.contains("  - inherits BaseService (inheritance)\n"));
    }

    #[test]
    fn test_truncates_at_limit() {
        let text = architecture_prompt_with_limit(&summary(&["Alpha", "Bravo"]), 1);
        assert!(text.ends_with(TRUNCATED));
        assert!(!text.contains("Class: Alpha"));
    }
}
