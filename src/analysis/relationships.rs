// src/analysis/relationships.rs
//! Relationship extraction.
//!
//! Deliberately over-approximates: every invocation and every member
//! reference in any method body becomes an edge candidate. The noise filter
//! then drops receivers that can never name another class.

use crate::ast::{ClassDecl, NodeKind};
use crate::types::{EntityInfo, RelationKind, Relationship};

const MIN_TARGET_LEN: usize = 4;

/// All relationships of a class, noise-filtered.
#[must_use]
pub fn detect(class: &ClassDecl, entities: &[EntityInfo]) -> Vec<Relationship> {
    let mut found = Vec::new();

    if let Some(parent) = &class.extends {
        found.push(Relationship::new(RelationKind::Inherits, parent.name.as_str()));
    }
    found.extend(
        class
            .implements
            .iter()
            .map(|t| Relationship::new(RelationKind::Implements, t.name.as_str())),
    );

    for method in &class.methods {
        for node in method.body_nodes() {
            match &node.kind {
                NodeKind::Invocation(inv) => {
                    let target = inv.qualifier.as_deref().unwrap_or("this");
                    found.push(Relationship::new(RelationKind::Calls, target));
                }
                NodeKind::MemberReference { member, .. } => {
                    found.push(Relationship::new(RelationKind::DataAccess, member.as_str()));
                }
                _ => {}
            }
        }
    }

    for rel in entities.iter().flat_map(|e| &e.relationships) {
        found.push(Relationship::entity(rel.target_entity.as_str(), &rel.association));
    }

    found.retain(|r| is_meaningful(&r.target, &class.name));
    found
}

fn is_meaningful(target: &str, own_name: &str) -> bool {
    !matches!(target, "this" | "super")
        && target != own_name
        && target.chars().count() >= MIN_TARGET_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{MethodDecl, Node, TypeRef};
    use crate::types::EntityRelationship;

    fn class_with_body(body: Vec<Node>) -> ClassDecl {
        let mut class = ClassDecl::new("OrderService");
        class.methods.push(MethodDecl {
            name: "run".into(),
            body: Some(body),
            ..MethodDecl::default()
        });
        class
    }

    #[test]
    fn test_noise_filter() {
        let class = class_with_body(vec![
            Node::call(None, "helper", Vec::new()),
            Node::call(Some("super"), "init", Vec::new()),
            Node::call(Some("OrderService"), "create", Vec::new()),
            Node::call(Some("abc"), "x", Vec::new()),
            Node::call(Some("paymentGateway"), "charge", Vec::new()),
            Node::member_ref("id"),
            Node::member_ref("orders"),
        ]);
        let rels = detect(&class, &[]);
        let targets: Vec<&str> = rels.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["paymentGateway", "orders"]);
        for bad in ["this", "super", "OrderService"] {
            assert!(!targets.contains(&bad));
        }
        assert!(targets.iter().all(|t| t.len() > 3));
    }

    #[test]
    fn test_nested_invocations_counted() {
        let nested = Node::call(
            Some("repository"),
            "save",
            vec![Node::call(Some("mapper"), "toEntity", Vec::new())],
        );
        let class = class_with_body(vec![Node::new(NodeKind::If, vec![nested])]);
        let rels = detect(&class, &[]);
        assert_eq!(rels.len(), 2);
        assert!(rels.iter().all(|r| r.kind == RelationKind::Calls));
    }

    #[test]
    fn test_structural_and_entity_edges() {
        let mut class = ClassDecl::new("Owner");
        class.extends = Some(TypeRef::named("BaseEntity"));
        class.implements.push(TypeRef::named("Serializable"));
        let entities = vec![EntityInfo {
            table_name: None,
            fields: Vec::new(),
            relationships: vec![EntityRelationship {
                association: "OneToMany".into(),
                field: "pets".into(),
                target_entity: "PetRecord".into(),
                mapped_by: None,
            }],
        }];
        let rels = detect(&class, &entities);
        let kinds: Vec<RelationKind> = rels.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![RelationKind::Inherits, RelationKind::Implements, RelationKind::EntityRelationship]
        );
        assert_eq!(rels[2].relationship_type, "OneToMany");
    }
}
