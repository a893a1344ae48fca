// src/graph/mod.rs
//! Cross-class dependency graph, built once per scan after all batches finish.

pub mod cycles;

use std::collections::BTreeMap;

use crate::types::{ClassRecord, CodeSmell};

use self::cycles::Adjacency;

/// Nodes are the classes of one scan; edges come from `calls` and
/// `data_access` relationships. Targets need not be classes.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    adjacency: Adjacency,
}

impl DependencyGraph {
    #[must_use]
    pub fn build(summary: &BTreeMap<String, ClassRecord>) -> Self {
        let mut adjacency = Adjacency::new();
        for (name, record) in summary {
            let targets = adjacency.entry(name.clone()).or_default();
            targets.extend(record.dependency_targets().map(str::to_string));
        }
        Self { adjacency }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(std::collections::BTreeSet::len).sum()
    }

    pub fn targets(&self, class_name: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(class_name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<String>> {
        cycles::simple_cycles(&self.adjacency)
    }
}

/// Detects cycles and marks every participating class once with
/// `Cyclic Dependency`. Returns the cycles found.
pub fn apply_cycles(summary: &mut BTreeMap<String, ClassRecord>) -> Vec<Vec<String>> {
    let cycles = DependencyGraph::build(summary).cycles();
    for cycle in &cycles {
        let closing = cycle.first().map_or("", String::as_str);
        tracing::warn!("Cyclic dependency detected: {} -> {closing}", cycle.join(" -> "));
        for class_name in cycle {
            if let Some(record) = summary.get_mut(class_name) {
                record.add_smell_once(CodeSmell::CyclicDependency);
            }
        }
    }
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RelationKind, Relationship};

    fn summary(edges: &[(&str, &str, RelationKind)]) -> BTreeMap<String, ClassRecord> {
        let mut map = BTreeMap::new();
        for (from, to, kind) in edges {
            let record = map.entry((*from).to_string()).or_insert_with(|| {
                crate::analysis::build_record(
                    &crate::ast::ClassDecl::new(from),
                    std::path::Path::new("x.java"),
                    std::time::SystemTime::UNIX_EPOCH,
                    &crate::config::ScanConfig::default(),
                )
            });
            record.relationships.push(Relationship::new(*kind, *to));
        }
        map
    }

    #[test]
    fn test_only_dependency_kinds_become_edges() {
        let map = summary(&[
            ("Alpha", "Bravo", RelationKind::Calls),
            ("Alpha", "Charlie", RelationKind::DataAccess),
            ("Alpha", "Delta", RelationKind::Inherits),
        ]);
        let graph = DependencyGraph::build(&map);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.targets("Alpha").collect::<Vec<_>>(), vec!["Bravo", "Charlie"]);
    }

    #[test]
    fn test_smell_added_once_per_class() {
        // Bravo sits on two cycles.
        let mut map = summary(&[
            ("Alpha", "Bravo", RelationKind::Calls),
            ("Bravo", "Alpha", RelationKind::Calls),
            ("Bravo", "Charlie", RelationKind::Calls),
            ("Charlie", "Bravo", RelationKind::DataAccess),
        ]);
        let cycles = apply_cycles(&mut map);
        assert_eq!(cycles.len(), 2);
        let bravo = &map["Bravo"];
        let count = bravo
            .code_smells
            .iter()
            .filter(|s| **s == CodeSmell::CyclicDependency)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_entity_relationships_never_cycle() {
        let mut map = summary(&[
            ("Owner", "Pets", RelationKind::EntityRelationship),
            ("Pets", "Owner", RelationKind::EntityRelationship),
        ]);
        assert!(apply_cycles(&mut map).is_empty());
    }
}
