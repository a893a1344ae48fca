use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

mod features;
pub use features::{
    Advice, AspectInfo, ConfigProperty, DatabaseInteraction, DocumentationCoverage, EntityField,
    EntityInfo, EntityRelationship, ExternalApiCall, FeatureBlocks, MessagingUsage,
    ModuleCoupling, OutdatedDependency, SecuredMethod, SecurityInfo, SpringBean,
};
pub(crate) use features::non_empty;

/// Architectural role inferred from class annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameworkRole {
    Application,
    Configuration,
    RestController,
    Controller,
    Service,
    Repository,
    Component,
    #[default]
    Unknown,
}

impl FrameworkRole {
    /// Roles in classification priority order.
    pub const PRIORITY: [Self; 7] = [
        Self::Application,
        Self::Configuration,
        Self::RestController,
        Self::Controller,
        Self::Service,
        Self::Repository,
        Self::Component,
    ];

    /// The annotation name that marks this role.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Application => "SpringBootApplication",
            Self::Configuration => "Configuration",
            Self::RestController => "RestController",
            Self::Controller => "Controller",
            Self::Service => "Service",
            Self::Repository => "Repository",
            Self::Component => "Component",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FrameworkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    Controller,
    Service,
    Repository,
    Entity,
    #[default]
    Unknown,
}

impl Layer {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Controller => "Controller Layer",
            Self::Service => "Service Layer",
            Self::Repository => "Repository Layer",
            Self::Entity => "Entity Layer",
            Self::Unknown => "Unknown Layer",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A heuristic maintainability finding attached to a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodeSmell {
    LargeClass,
    LongMethod(String),
    ComplexMethod { name: String, complexity: usize },
    HeavyController,
    AmbiguousComponent,
    GodClass,
    DataClass,
    ExcessiveStaticMethods,
    CyclicDependency,
}

impl fmt::Display for CodeSmell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargeClass => f.write_str("Large Class"),
            Self::LongMethod(name) => write!(f, "Long Method: {name}"),
            Self::ComplexMethod { name, complexity } => {
                write!(f, "Complex Method: {name} (Cyclomatic Complexity: {complexity})")
            }
            Self::HeavyController => f.write_str("Heavy Controller"),
            Self::AmbiguousComponent => {
                f.write_str("Ambiguous Component: Both @Service and @Repository present")
            }
            Self::GodClass => f.write_str("God Class"),
            Self::DataClass => f.write_str("Data Class"),
            Self::ExcessiveStaticMethods => f.write_str("Excessive Static Methods"),
            Self::CyclicDependency => f.write_str("Cyclic Dependency"),
        }
    }
}

macro_rules! serialize_as_display {
    ($($ty:ty),*) => {
        $(impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        })*
    };
}

serialize_as_display!(FrameworkRole, Layer, CodeSmell);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Inherits,
    Implements,
    Calls,
    DataAccess,
    EntityRelationship,
}

impl RelationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inherits => "inherits",
            Self::Implements => "implements",
            Self::Calls => "calls",
            Self::DataAccess => "data_access",
            Self::EntityRelationship => "entity_relationship",
        }
    }

    /// Whether relationships of this kind become dependency-graph edges.
    #[must_use]
    pub fn is_dependency(self) -> bool {
        matches!(self, Self::Calls | Self::DataAccess)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub target: String,
    /// Edge classification: `inheritance`, `method_call`, `OneToMany`, ...
    pub relationship_type: String,
}

impl Relationship {
    #[must_use]
    pub fn new(kind: RelationKind, target: impl Into<String>) -> Self {
        let relationship_type = match kind {
            RelationKind::Inherits => "inheritance",
            RelationKind::Implements => "interface_implementation",
            RelationKind::Calls => "method_call",
            RelationKind::DataAccess => "data_access",
            RelationKind::EntityRelationship => "entity_relationship",
        };
        Self {
            kind,
            target: target.into(),
            relationship_type: relationship_type.to_string(),
        }
    }

    #[must_use]
    pub fn entity(target: impl Into<String>, association: &str) -> Self {
        Self {
            kind: RelationKind::EntityRelationship,
            target: target.into(),
            relationship_type: association.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
    pub body_length: usize,
}

/// Everything extracted for one class in one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRecord {
    #[serde(skip)]
    pub class_name: String,
    pub file_path: PathBuf,
    #[serde(skip)]
    pub last_modified: SystemTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    pub component_type: FrameworkRole,
    pub layer: Layer,
    pub bounded_context: String,
    pub domain: String,
    #[serde(skip)]
    pub is_test_class: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub methods_complexity: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub code_smells: Vec<CodeSmell>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub api_endpoints: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inter_service_calls: Vec<String>,
    #[serde(flatten)]
    pub features: FeatureBlocks,
}

impl ClassRecord {
    #[must_use]
    pub fn has_smell(&self, smell: &CodeSmell) -> bool {
        self.code_smells.contains(smell)
    }

    /// Appends a smell unless the record already carries it.
    pub fn add_smell_once(&mut self, smell: CodeSmell) {
        if !self.has_smell(&smell) {
            self.code_smells.push(smell);
        }
    }

    /// Targets of relationships that become dependency-graph edges.
    pub fn dependency_targets(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.kind.is_dependency())
            .map(|r| r.target.as_str())
    }
}

/// Counters aggregated by the scheduler from per-file and per-class outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub total_files: usize,
    pub scanned_classes: usize,
    pub unchanged_classes: usize,
    pub filtered_classes: usize,
    /// Classes whose name was already held by a record from a lower path.
    pub duplicate_classes: usize,
    pub parse_failures: usize,
    pub class_failures: usize,
    pub batch_failures: usize,
    /// Files that were never processed because their batch failed.
    pub lost_files: usize,
}

impl ScanStats {
    /// Settles the class counters against what the summary finally kept.
    ///
    /// A record can be displaced by a lower-path duplicate after its own
    /// outcome was counted, so per-outcome tallies alone may overcount.
    pub fn settle(&mut self, kept: usize, reused: usize) {
        let placed = self.scanned_classes + self.unchanged_classes + self.duplicate_classes;
        self.unchanged_classes = reused;
        self.scanned_classes = kept - reused;
        self.duplicate_classes = placed.saturating_sub(kept);
    }
}

/// Result of one project scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub summary: BTreeMap<String, ClassRecord>,
    pub cycles: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outdated_dependencies: Vec<OutdatedDependency>,
    pub stats: ScanStats,
    pub duration_ms: u128,
}

impl ScanReport {
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.summary.len()
    }

    #[must_use]
    pub fn smell_count(&self) -> usize {
        self.summary.values().map(|r| r.code_smells.len()).sum()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.stats.parse_failures + self.stats.class_failures + self.stats.batch_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smell_labels() {
        assert_eq!(CodeSmell::LargeClass.to_string(), "Large Class");
        assert_eq!(CodeSmell::LongMethod("run".into()).to_string(), "Long Method: run");
        assert_eq!(
            CodeSmell::ComplexMethod { name: "run".into(), complexity: 12 }.to_string(),
            "Complex Method: run (Cyclomatic Complexity: 12)"
        );
    }

    #[test]
    fn test_relationship_types() {
        assert_eq!(Relationship::new(RelationKind::Calls, "repo").relationship_type, "method_call");
        assert_eq!(Relationship::entity("Pet", "OneToMany").relationship_type, "OneToMany");
        assert!(RelationKind::DataAccess.is_dependency());
        assert!(!RelationKind::Inherits.is_dependency());
    }

    #[test]
    fn test_settle_moves_displaced_records_to_duplicates() {
        // Two builds of one name both reported as scanned; only one was kept.
        let mut stats = ScanStats {
            scanned_classes: 3,
            unchanged_classes: 1,
            ..ScanStats::default()
        };
        stats.settle(3, 1);
        assert_eq!(stats.scanned_classes, 2);
        assert_eq!(stats.unchanged_classes, 1);
        assert_eq!(stats.duplicate_classes, 1);
    }

    #[test]
    fn test_smell_serializes_as_label() {
        let json = serde_json::to_string(&vec![CodeSmell::GodClass]).unwrap();
        assert_eq!(json, "[\"God Class\"]");
    }
}
