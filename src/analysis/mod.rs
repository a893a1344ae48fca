// src/analysis/mod.rs
//! Per-class analysis pipeline and the batch scheduler that drives it.

pub mod classify;
pub mod complexity;
pub mod engine;
pub mod extract;
pub mod features;
pub mod relationships;
pub mod smells;
pub mod worker;

pub use self::engine::Scanner;

use std::path::Path;
use std::time::SystemTime;

use crate::ast::{annotation, ClassDecl};
use crate::config::ScanConfig;
use crate::types::ClassRecord;

use self::smells::SmellInput;

/// Runs every extractor over one class and assembles its record.
///
/// Cache checks and annotation filtering happen before this, in the worker.
/// Graph-derived smells are added later, after all batches finish.
#[must_use]
pub fn build_record(
    class: &ClassDecl,
    path: &Path,
    last_modified: SystemTime,
    config: &ScanConfig,
) -> ClassRecord {
    let role = classify::framework_role(&class.annotations);
    let is_test_class = classify::is_test_class(&class.annotations, path);
    let methods_complexity = complexity::methods_complexity(class);

    let input = SmellInput::from_class(class, &methods_complexity, role, is_test_class);
    let code_smells = smells::detect(&input, &config.thresholds());

    let features = features::collect(class, role);
    let entities = features.database_entities.as_deref().unwrap_or_default();
    let relationships = relationships::detect(class, entities);

    ClassRecord {
        class_name: class.name.clone(),
        file_path: path.to_path_buf(),
        last_modified,
        annotations: annotation::names(&class.annotations),
        component_type: role,
        layer: classify::layer(path),
        bounded_context: classify::bounded_context(path),
        domain: classify::domain(path),
        is_test_class,
        methods: extract::methods(class),
        fields: extract::fields(class),
        code_smells,
        relationships,
        api_endpoints: features::web::api_endpoints(class),
        inter_service_calls: extract::service_injections(class),
        methods_complexity,
        features,
    }
}
