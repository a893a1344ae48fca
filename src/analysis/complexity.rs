// src/analysis/complexity.rs
//! Cyclomatic complexity per method.

use std::collections::BTreeMap;

use crate::ast::{ClassDecl, MethodDecl, Node, NodeKind};

fn is_branch(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::If
            | NodeKind::For
            | NodeKind::While
            | NodeKind::DoWhile
            | NodeKind::Switch
            | NodeKind::Ternary
            | NodeKind::Catch
    )
}

/// 1 + every branching construct anywhere in the body, nested ones included.
#[must_use]
pub fn cyclomatic(method: &MethodDecl) -> usize {
    1 + method.body_nodes().filter(|n| is_branch(n)).count()
}

/// Complexity keyed by method name. Overloads share a key; the last one wins.
#[must_use]
pub fn methods_complexity(class: &ClassDecl) -> BTreeMap<String, usize> {
    class
        .methods
        .iter()
        .map(|m| (m.name.clone(), cyclomatic(m)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(body: Vec<Node>) -> MethodDecl {
        MethodDecl {
            name: "run".into(),
            body: Some(body),
            ..MethodDecl::default()
        }
    }

    #[test]
    fn test_empty_and_abstract_methods_are_one() {
        assert_eq!(cyclomatic(&method(Vec::new())), 1);
        assert_eq!(cyclomatic(&MethodDecl::default()), 1);
    }

    #[test]
    fn test_three_ifs_and_a_loop() {
        let body = vec![
            Node::leaf(NodeKind::If),
            Node::leaf(NodeKind::If),
            Node::leaf(NodeKind::If),
            Node::leaf(NodeKind::For),
        ];
        assert_eq!(cyclomatic(&method(body)), 5);
    }

    #[test]
    fn test_nested_constructs_count_once_each() {
        let body = vec![Node::new(
            NodeKind::While,
            vec![Node::new(
                NodeKind::Other,
                vec![
                    Node::leaf(NodeKind::Ternary),
                    Node::new(NodeKind::Switch, vec![Node::leaf(NodeKind::Catch)]),
                    Node::leaf(NodeKind::DoWhile),
                ],
            )],
        )];
        assert_eq!(cyclomatic(&method(body)), 6);
    }

    #[test]
    fn test_branches_inside_call_arguments() {
        let body = vec![Node::call(Some("log"), "info", vec![Node::leaf(NodeKind::Ternary)])];
        assert_eq!(cyclomatic(&method(body)), 2);
    }

    #[test]
    fn test_overloads_last_wins() {
        let mut class = ClassDecl::new("A");
        class.methods.push(method(vec![Node::leaf(NodeKind::If)]));
        class.methods.push(method(Vec::new()));
        assert_eq!(methods_complexity(&class).get("run"), Some(&1));
    }
}
