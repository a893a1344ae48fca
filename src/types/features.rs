//! Optional feature blocks of a class record.
//!
//! A block is `Some` only when extraction found something. `None` means
//! "not applicable", never "not computed".

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureBlocks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spring_beans: Option<Vec<SpringBean>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspects: Option<Vec<AspectInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_interactions: Option<Vec<DatabaseInteraction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_entities: Option<Vec<EntityInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_usage: Option<Vec<MessagingUsage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_api_calls: Option<Vec<ExternalApiCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_properties: Option<Vec<ConfigProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_coupling: Option<Vec<ModuleCoupling>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_coverage: Option<DocumentationCoverage>,
}

/// `Some(items)` when there is at least one item.
#[must_use]
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpringBean {
    pub name: String,
    pub return_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityInfo {
    pub secured_methods: Vec<SecuredMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecuredMethod {
    pub method: String,
    pub annotation: String,
    pub value: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AspectInfo {
    pub name: String,
    pub advices: Vec<Advice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    #[serde(rename = "type")]
    pub advice_type: String,
    pub method: String,
    pub pointcut: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseInteraction {
    pub name: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    pub table_name: Option<String>,
    pub fields: Vec<EntityField>,
    pub relationships: Vec<EntityRelationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub column_name: Option<String>,
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRelationship {
    /// `OneToMany`, `ManyToOne`, `ManyToMany` or `OneToOne`.
    #[serde(rename = "type")]
    pub association: String,
    pub field: String,
    pub target_entity: String,
    pub mapped_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagingUsage {
    pub usage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalApiCall {
    pub usage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub client_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigProperty {
    pub field: String,
    pub property: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleCoupling {
    pub method: String,
    pub coupled_module: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentationCoverage {
    pub documented_methods: usize,
    pub total_methods: usize,
    pub coverage: f64,
}

/// A build dependency pinned to a non-release version. Scan-level, not per class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedDependency {
    pub dependency: String,
    pub version: String,
    pub issue: String,
}
