// src/reporting/views.rs
//! Structure and integration views over the scan summary.
//!
//! Both are projections of [`ClassRecord`]; empty fields are pruned on
//! serialization.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::{
    ClassRecord, ConfigProperty, EntityInfo, ExternalApiCall, FieldDescriptor, FrameworkRole,
    Layer, MessagingUsage, MethodDescriptor, Relationship,
};

/// Code-structure projection of one class.
#[derive(Debug, Serialize)]
pub struct StructureView<'a> {
    pub file_path: PathBuf,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub annotations: &'a [String],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub methods: &'a [MethodDescriptor],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub fields: &'a [FieldDescriptor],
    pub component_type: FrameworkRole,
    pub layer: Layer,
    #[serde(skip_serializing_if = "is_empty_map")]
    pub methods_complexity: &'a BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub code_smells: Vec<String>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub relationships: &'a [Relationship],
}

/// Data and integration projection of one class.
#[derive(Debug, Serialize)]
pub struct IntegrationView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_entities: Option<&'a [EntityInfo]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_properties: Option<&'a [ConfigProperty]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_api_calls: Option<&'a [ExternalApiCall]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_usage: Option<&'a [MessagingUsage]>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub api_endpoints: &'a [String],
    #[serde(skip_serializing_if = "is_blank")]
    pub bounded_context: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    pub domain: &'a str,
}

impl IntegrationView<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.database_entities.is_none()
            && self.config_properties.is_none()
            && self.external_api_calls.is_none()
            && self.messaging_usage.is_none()
            && self.api_endpoints.is_empty()
            && self.bounded_context.is_empty()
            && self.domain.is_empty()
    }
}

fn is_empty_slice<T>(items: &&[T]) -> bool {
    items.is_empty()
}

fn is_empty_map(map: &&BTreeMap<String, usize>) -> bool {
    map.is_empty()
}

fn is_blank(s: &&str) -> bool {
    s.is_empty()
}

fn relative(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[must_use]
pub fn structure_of<'a>(record: &'a ClassRecord, root: &Path) -> StructureView<'a> {
    StructureView {
        file_path: relative(&record.file_path, root),
        annotations: &record.annotations,
        methods: &record.methods,
        fields: &record.fields,
        component_type: record.component_type,
        layer: record.layer,
        methods_complexity: &record.methods_complexity,
        code_smells: record.code_smells.iter().map(ToString::to_string).collect(),
        relationships: &record.relationships,
    }
}

#[must_use]
pub fn integration_of(record: &ClassRecord) -> IntegrationView<'_> {
    let f = &record.features;
    IntegrationView {
        database_entities: f.database_entities.as_deref(),
        config_properties: f.config_properties.as_deref(),
        external_api_calls: f.external_api_calls.as_deref(),
        messaging_usage: f.messaging_usage.as_deref(),
        api_endpoints: &record.api_endpoints,
        bounded_context: &record.bounded_context,
        domain: &record.domain,
    }
}

/// Class name to structure view, with paths relative to `root`.
#[must_use]
pub fn structure_view<'a>(
    summary: &'a BTreeMap<String, ClassRecord>,
    root: &Path,
) -> BTreeMap<&'a str, StructureView<'a>> {
    summary
        .iter()
        .map(|(name, record)| (name.as_str(), structure_of(record, root)))
        .collect()
}

/// Class name to integration view. Classes with nothing to show are left out.
#[must_use]
pub fn integration_view(
    summary: &BTreeMap<String, ClassRecord>,
) -> BTreeMap<&str, IntegrationView<'_>> {
    summary
        .iter()
        .map(|(name, record)| (name.as_str(), integration_of(record)))
        .filter(|(_, view)| !view.is_empty())
        .collect()
}

/// Full records with paths relative to `root`.
#[must_use]
pub fn combined(summary: &BTreeMap<String, ClassRecord>, root: &Path) -> BTreeMap<String, ClassRecord> {
    summary
        .iter()
        .map(|(name, record)| {
            let mut record = record.clone();
            record.file_path = relative(&record.file_path, root);
            (name.clone(), record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_record;
    use crate::ast::{AnnotationRef, ClassDecl};
    use crate::config::ScanConfig;
    use std::time::SystemTime;

    fn sample() -> BTreeMap<String, ClassRecord> {
        let mut class = ClassDecl::new("FlightService");
        class.annotations.push(AnnotationRef::bare("Service"));
        let record = build_record(
            &class,
            Path::new("/proj/src/flight/service/FlightService.java"),
            SystemTime::UNIX_EPOCH,
            &ScanConfig::default(),
        );
        BTreeMap::from([("FlightService".to_string(), record)])
    }

    #[test]
    fn test_structure_prunes_empty_members() -> anyhow::Result<()> {
        let summary = sample();
        let view = structure_view(&summary, Path::new("/proj"));
        let json = serde_json::to_value(&view)?;
        let entry = &json["FlightService"];
        assert_eq!(entry["file_path"], "src/flight/service/FlightService.java");
        assert_eq!(entry["component_type"], "Service");
        assert_eq!(entry["layer"], "Service Layer");
        assert!(entry.get("methods").is_none());
        assert!(entry.get("relationships").is_none());
        Ok(())
    }

    #[test]
    fn test_integration_keeps_tags() -> anyhow::Result<()> {
        let summary = sample();
        let json = serde_json::to_value(integration_view(&summary))?;
        let entry = &json["FlightService"];
        assert_eq!(entry["bounded_context"], "Flight Context");
        assert!(entry.get("api_endpoints").is_none());
        assert!(entry.get("database_entities").is_none());
        Ok(())
    }

    #[test]
    fn test_combined_drops_internal_fields() -> anyhow::Result<()> {
        let summary = sample();
        let json = serde_json::to_value(combined(&summary, Path::new("/proj")))?;
        let entry = &json["FlightService"];
        assert!(entry.get("last_modified").is_none());
        assert!(entry.get("is_test_class").is_none());
        assert!(entry.get("class_name").is_none());
        assert_eq!(entry["file_path"], "src/flight/service/FlightService.java");
        Ok(())
    }
}
