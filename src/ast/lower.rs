// src/ast/lower.rs
//! Tree-sitter Java front end: lowers a concrete syntax tree into the model.

use std::path::Path;

use tree_sitter::{Node as TsNode, Parser};

use super::annotation::{AnnotationArg, AnnotationName, AnnotationRef};
use super::{
    AstProvider, ClassDecl, CompilationUnit, ConstructorDecl, FieldDecl, Invocation, MethodDecl,
    Node, NodeKind, Parameter, TypeRef,
};
use crate::error::{Result, ScanError};
use crate::lang::{self, Lang};

/// [`AstProvider`] backed by `tree-sitter-java`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaParser;

impl JavaParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AstProvider for JavaParser {
    fn parse(&self, path: &Path, source: &str) -> Result<CompilationUnit> {
        let mut parser = Parser::new();
        parser
            .set_language(Lang::Java.grammar())
            .map_err(|_| ScanError::parse(path, "incompatible Java grammar version"))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ScanError::parse(path, "parser produced no tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            let row = first_error_row(root).unwrap_or(1);
            return Err(ScanError::parse(path, format!("syntax error near line {row}")));
        }

        let lowering = Lowering {
            src: source.as_bytes(),
        };
        let mut cursor = root.walk();
        let classes = root
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "class_declaration")
            .map(|n| lowering.class(n))
            .collect();

        Ok(CompilationUnit { classes })
    }
}

fn first_error_row(node: TsNode) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(row) = first_error_row(child) {
                return Some(row);
            }
        }
    }
    None
}

struct Lowering<'a> {
    src: &'a [u8],
}

impl<'a> Lowering<'a> {
    fn text(&self, node: TsNode) -> &'a str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn field_text(&self, node: TsNode, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|n| self.text(n).to_string())
    }

    fn class(&self, node: TsNode) -> ClassDecl {
        let (_, annotations) = self.modifiers(node);
        let mut class = ClassDecl {
            name: self.field_text(node, "name").unwrap_or_default(),
            annotations,
            extends: node
                .child_by_field_name("superclass")
                .and_then(|s| s.named_child(0))
                .and_then(|t| self.type_ref(t)),
            implements: node
                .child_by_field_name("interfaces")
                .map(|i| self.interfaces(i))
                .unwrap_or_default(),
            ..ClassDecl::default()
        };

        let Some(body) = node.child_by_field_name("body") else {
            return class;
        };
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" => class.fields.push(self.field(member)),
                "method_declaration" => class.methods.push(self.method(member)),
                "constructor_declaration" => class.constructors.push(self.constructor(member)),
                _ => {}
            }
        }
        class
    }

    fn interfaces(&self, node: TsNode) -> Vec<TypeRef> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for list in node.named_children(&mut cursor) {
            let mut inner = list.walk();
            out.extend(list.named_children(&mut inner).filter_map(|t| self.type_ref(t)));
        }
        out
    }

    /// Modifier keywords and annotations of a declaration.
    fn modifiers(&self, node: TsNode) -> (Vec<String>, Vec<AnnotationRef>) {
        let mut keywords = Vec::new();
        let mut annotations = Vec::new();
        let mut cursor = node.walk();
        let Some(mods) = node.children(&mut cursor).find(|c| c.kind() == "modifiers") else {
            return (keywords, annotations);
        };
        let mut inner = mods.walk();
        for child in mods.children(&mut inner) {
            match child.kind() {
                "annotation" | "marker_annotation" => annotations.push(self.annotation(child)),
                k if lang::is_comment(k) => {}
                _ => keywords.push(self.text(child).to_string()),
            }
        }
        (keywords, annotations)
    }

    fn annotation(&self, node: TsNode) -> AnnotationRef {
        let raw = match node.child_by_field_name("name") {
            Some(n) if n.kind() == "scoped_identifier" => AnnotationName::Qualified {
                scope: self.field_text(n, "scope").unwrap_or_default(),
                member: self.field_text(n, "name").unwrap_or_default(),
            },
            Some(n) => AnnotationName::Bare(self.text(n).to_string()),
            None => AnnotationName::Bare(String::new()),
        };
        let mut args = Vec::new();
        if let Some(list) = node.child_by_field_name("arguments") {
            let mut cursor = list.walk();
            for child in list.named_children(&mut cursor) {
                if child.kind() == "element_value_pair" {
                    let key = self.field_text(child, "key");
                    if let Some(value) = child.child_by_field_name("value") {
                        self.element_values(value, key.as_deref(), &mut args);
                    }
                } else {
                    self.element_values(child, None, &mut args);
                }
            }
        }
        AnnotationRef::resolve(&raw, args)
    }

    fn element_values(&self, node: TsNode, key: Option<&str>, out: &mut Vec<AnnotationArg>) {
        let value = match node.kind() {
            "element_value_array_initializer" => {
                let mut cursor = node.walk();
                for element in node.named_children(&mut cursor) {
                    self.element_values(element, key, out);
                }
                return;
            }
            "class_literal" => node
                .named_child(0)
                .map_or_else(String::new, |t| self.text(t).to_string()),
            k if lang::is_literal(k) => unquote(self.text(node)).to_string(),
            _ => return,
        };
        out.push(AnnotationArg {
            key: key.map(str::to_string),
            value,
        });
    }

    fn type_ref(&self, node: TsNode) -> Option<TypeRef> {
        match node.kind() {
            "void_type" => None,
            "generic_type" => {
                let mut cursor = node.walk();
                let mut name = String::new();
                let mut arguments = Vec::new();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "type_arguments" {
                        let mut inner = child.walk();
                        arguments.extend(
                            child.named_children(&mut inner).filter_map(|a| self.type_ref(a)),
                        );
                    } else if name.is_empty() {
                        name = self.text(child).to_string();
                    }
                }
                Some(TypeRef { name, arguments })
            }
            "array_type" => node
                .child_by_field_name("element")
                .and_then(|e| self.type_ref(e)),
            "annotated_type" | "wildcard" => {
                let count = node.named_child_count();
                (0..count)
                    .rev()
                    .filter_map(|i| node.named_child(i))
                    .find(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
                    .and_then(|c| self.type_ref(c))
            }
            _ => Some(TypeRef::named(self.text(node))),
        }
    }

    fn field(&self, node: TsNode) -> FieldDecl {
        let (modifiers, annotations) = self.modifiers(node);
        let mut cursor = node.walk();
        let declarators = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "variable_declarator")
            .filter_map(|d| self.field_text(d, "name"))
            .collect();
        FieldDecl {
            ty: node.child_by_field_name("type").and_then(|t| self.type_ref(t)),
            declarators,
            annotations,
            modifiers,
        }
    }

    fn parameters(&self, node: TsNode) -> Vec<Parameter> {
        let Some(list) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|p| matches!(p.kind(), "formal_parameter" | "spread_parameter"))
            .map(|p| self.parameter(p))
            .collect()
    }

    fn parameter(&self, node: TsNode) -> Parameter {
        let (_, annotations) = self.modifiers(node);
        let mut cursor = node.walk();
        let children: Vec<TsNode> = node.named_children(&mut cursor).collect();

        let ty_node = node.child_by_field_name("type").or_else(|| {
            children
                .iter()
                .copied()
                .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))
        });
        let name = self.field_text(node, "name").or_else(|| {
            children
                .iter()
                .find(|c| c.kind() == "variable_declarator")
                .and_then(|d| self.field_text(*d, "name"))
        });

        Parameter {
            name: name.unwrap_or_default(),
            ty: ty_node.and_then(|t| self.type_ref(t)),
            annotations,
        }
    }

    fn method(&self, node: TsNode) -> MethodDecl {
        let (modifiers, annotations) = self.modifiers(node);
        MethodDecl {
            name: self.field_text(node, "name").unwrap_or_default(),
            return_type: node.child_by_field_name("type").and_then(|t| self.type_ref(t)),
            parameters: self.parameters(node),
            annotations,
            modifiers,
            body: node.child_by_field_name("body").map(|b| self.block(b)),
            documented: self.has_javadoc(node),
        }
    }

    fn constructor(&self, node: TsNode) -> ConstructorDecl {
        let (_, annotations) = self.modifiers(node);
        ConstructorDecl {
            parameters: self.parameters(node),
            annotations,
        }
    }

    fn has_javadoc(&self, node: TsNode) -> bool {
        let mut prev = node.prev_sibling();
        while let Some(sibling) = prev {
            match sibling.kind() {
                "block_comment" | "comment" => return self.text(sibling).starts_with("/**"),
                "line_comment" => prev = sibling.prev_sibling(),
                _ => return false,
            }
        }
        false
    }

    /// Top-level statements of a block.
    fn block(&self, node: TsNode) -> Vec<Node> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter_map(|s| self.lower(s))
            .collect()
    }

    fn lower(&self, node: TsNode) -> Option<Node> {
        let kind = match node.kind() {
            k if lang::is_comment(k) => return None,
            k if lang::is_literal(k) => return Some(Node::literal(unquote(self.text(node)))),
            "identifier" => return Some(Node::member_ref(self.text(node))),
            "method_invocation" => return Some(self.invocation(node)),
            "field_access" => return Some(self.field_access(node)),
            "break_statement" | "continue_statement" => return Some(Node::leaf(NodeKind::Other)),
            "labeled_statement" => {
                let mut cursor = node.walk();
                let children = node
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() != "identifier")
                    .filter_map(|c| self.lower(c))
                    .collect();
                return Some(Node::new(NodeKind::Other, children));
            }
            "if_statement" => NodeKind::If,
            "for_statement" | "enhanced_for_statement" => NodeKind::For,
            "while_statement" => NodeKind::While,
            "do_statement" => NodeKind::DoWhile,
            "switch_expression" | "switch_statement" => NodeKind::Switch,
            "ternary_expression" => NodeKind::Ternary,
            "catch_clause" => NodeKind::Catch,
            _ => NodeKind::Other,
        };
        Some(Node::new(kind, self.lower_children(node)))
    }

    /// Lowers the expression children of a node, skipping declaration slots.
    fn lower_children(&self, node: TsNode) -> Vec<Node> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return out;
        }
        loop {
            let child = cursor.node();
            let declaration = cursor.field_name().is_some_and(lang::is_declaration_field);
            if child.is_named() && !declaration {
                if let Some(lowered) = self.lower(child) {
                    out.push(lowered);
                }
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        out
    }

    fn is_name_chain(&self, node: TsNode) -> bool {
        match node.kind() {
            "identifier" | "this" | "super" => true,
            "field_access" => node
                .child_by_field_name("object")
                .is_some_and(|o| self.is_name_chain(o)),
            _ => false,
        }
    }

    /// Splits a receiver into a name-chain qualifier or a lowered subtree.
    fn receiver(&self, object: Option<TsNode>) -> (Option<String>, Vec<Node>) {
        match object {
            Some(obj) if self.is_name_chain(obj) => (Some(self.text(obj).to_string()), Vec::new()),
            Some(obj) => (None, self.lower(obj).into_iter().collect()),
            None => (None, Vec::new()),
        }
    }

    fn invocation(&self, node: TsNode) -> Node {
        let (qualifier, receiver) = self.receiver(node.child_by_field_name("object"));
        let arguments = node
            .child_by_field_name("arguments")
            .map(|a| {
                let mut cursor = a.walk();
                a.named_children(&mut cursor)
                    .filter_map(|arg| self.lower(arg))
                    .collect()
            })
            .unwrap_or_default();
        Node::new(
            NodeKind::Invocation(Invocation {
                qualifier,
                member: self.field_text(node, "name").unwrap_or_default(),
                arguments,
            }),
            receiver,
        )
    }

    fn field_access(&self, node: TsNode) -> Node {
        let (qualifier, receiver) = self.receiver(node.child_by_field_name("object"));
        Node::new(
            NodeKind::MemberReference {
                qualifier,
                member: self.field_text(node, "field").unwrap_or_default(),
            },
            receiver,
        )
    }
}

fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> CompilationUnit {
        JavaParser::new()
            .parse(Path::new("Sample.java"), src)
            .expect("valid java")
    }

    #[test]
    fn test_class_shell() {
        let unit = parse(
            r#"
@Service
public class OrderService extends BaseService implements Auditable, Closeable {
    @Autowired
    private OrderRepository orderRepository;

    public void close() {}
}
"#,
        );
        assert_eq!(unit.classes.len(), 1);
        let class = &unit.classes[0];
        assert_eq!(class.name, "OrderService");
        assert_eq!(class.annotations[0].name(), "Service");
        assert_eq!(class.extends.as_ref().map(|t| t.name.as_str()), Some("BaseService"));
        assert_eq!(class.implements.len(), 2);
        assert_eq!(class.fields[0].declarators, vec!["orderRepository".to_string()]);
        assert_eq!(class.fields[0].type_name(), Some("OrderRepository"));
        assert!(class.fields[0].modifiers.contains(&"private".to_string()));
        assert_eq!(class.methods[0].return_type, None);
    }

    #[test]
    fn test_syntax_error_is_parse_failure() {
        let result = JavaParser::new().parse(Path::new("Broken.java"), "public class { void");
        assert!(matches!(result, Err(ScanError::Parse { .. })));
    }

    #[test]
    fn test_interfaces_are_not_records() {
        let unit = parse("public interface Repo { void save(); }");
        assert!(unit.classes.is_empty());
    }

    #[test]
    fn test_qualified_annotation_and_args() {
        let unit = parse(
            r#"
@org.springframework.stereotype.Component
@RequestMapping("/api")
class Api {}
"#,
        );
        let class = &unit.classes[0];
        assert_eq!(class.annotations[0].name(), "org.springframework.stereotype.Component");
        assert_eq!(class.annotations[1].values(), vec!["/api".to_string()]);
    }
}
