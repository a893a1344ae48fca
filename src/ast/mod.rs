// src/ast/mod.rs
//! Parsed-source model consumed by the analyzers.
//!
//! Everything downstream of the parser works on these plain structs, never on
//! parser-specific node handles. [`AstProvider`] is the seam: the scheduler
//! asks a provider for a [`CompilationUnit`] and does not care how it was made.

pub mod annotation;
pub mod lower;
pub mod walk;

pub use self::annotation::{AnnotationArg, AnnotationName, AnnotationRef};
pub use self::lower::JavaParser;
pub use self::walk::{descendants, Descendants};

use crate::error::Result;
use std::path::Path;

/// Turns source text into class declarations.
pub trait AstProvider: Send + Sync {
    /// Parses one source file.
    ///
    /// # Errors
    /// Returns `ScanError::Parse` when the file is not syntactically valid.
    fn parse(&self, path: &Path, source: &str) -> Result<CompilationUnit>;
}

/// One parsed file. Only top-level class declarations are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnit {
    pub classes: Vec<ClassDecl>,
}

/// A (possibly generic) type reference. `List<Order>` has name `List` and one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub arguments: Vec<TypeRef>,
}

impl TypeRef {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn generic(name: &str, arguments: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            arguments: arguments.iter().map(|a| Self::named(a)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<TypeRef>,
    pub annotations: Vec<AnnotationRef>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDecl {
    pub ty: Option<TypeRef>,
    pub declarators: Vec<String>,
    pub annotations: Vec<AnnotationRef>,
    pub modifiers: Vec<String>,
}

impl FieldDecl {
    /// Name of the first declarator, as used in per-field reports.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.declarators.first().map_or("Unknown", String::as_str)
    }

    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.ty.as_ref().map(|t| t.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    /// `None` for `void` or an unresolvable return type.
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
    pub annotations: Vec<AnnotationRef>,
    pub modifiers: Vec<String>,
    /// Top-level statements; `None` for abstract or interface methods.
    pub body: Option<Vec<Node>>,
    pub documented: bool,
}

impl MethodDecl {
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }

    /// Number of top-level statements in the body.
    #[must_use]
    pub fn body_length(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }

    /// Every node of the body, depth-first.
    #[must_use]
    pub fn body_nodes(&self) -> Descendants<'_> {
        descendants(self.body.as_deref().unwrap_or(&[]))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructorDecl {
    pub parameters: Vec<Parameter>,
    pub annotations: Vec<AnnotationRef>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub annotations: Vec<AnnotationRef>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub constructors: Vec<ConstructorDecl>,
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
}

impl ClassDecl {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// A method invocation: `qualifier.member(arguments)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Receiver written as a plain name chain (`repo`, `this.repo`, `a.b.C`).
    pub qualifier: Option<String>,
    pub member: String,
    pub arguments: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    If,
    For,
    While,
    DoWhile,
    Switch,
    Ternary,
    Catch,
    Invocation(Invocation),
    MemberReference {
        qualifier: Option<String>,
        member: String,
    },
    /// Literal source text with string quotes removed.
    Literal(String),
    Other,
}

/// A statement or expression inside a method body.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    #[must_use]
    pub fn leaf(kind: NodeKind) -> Self {
        Self::new(kind, Vec::new())
    }

    #[must_use]
    pub fn call(qualifier: Option<&str>, member: &str, arguments: Vec<Node>) -> Self {
        Self::leaf(NodeKind::Invocation(Invocation {
            qualifier: qualifier.map(str::to_string),
            member: member.to_string(),
            arguments,
        }))
    }

    #[must_use]
    pub fn member_ref(member: &str) -> Self {
        Self::leaf(NodeKind::MemberReference {
            qualifier: None,
            member: member.to_string(),
        })
    }

    #[must_use]
    pub fn literal(text: &str) -> Self {
        Self::leaf(NodeKind::Literal(text.to_string()))
    }

    #[must_use]
    pub fn as_invocation(&self) -> Option<&Invocation> {
        match &self.kind {
            NodeKind::Invocation(inv) => Some(inv),
            _ => None,
        }
    }
}
