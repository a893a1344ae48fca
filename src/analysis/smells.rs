// src/analysis/smells.rs
//! Threshold-driven code smell rules.
//!
//! Every rule is evaluated independently and the results accumulate. Test
//! classes are exempt from the size-based smells (`Large Class`, `God Class`).

use std::collections::BTreeMap;

use crate::ast::{annotation, ClassDecl};
use crate::config::Thresholds;
use crate::types::{CodeSmell, FrameworkRole};

/// Hard limits that are not configurable.
const MAX_FIELDS: usize = 10;
const HEAVY_CONTROLLER_METHODS: usize = 10;
const GOD_CLASS_MEMBERS: usize = 20;

/// The measurements the rules need, detached from the AST.
#[derive(Debug, Clone, Default)]
pub struct SmellInput<'a> {
    pub methods_count: usize,
    pub fields_count: usize,
    pub static_methods: usize,
    /// `(method name, body statement count)` in declaration order.
    pub method_lengths: Vec<(&'a str, usize)>,
    pub complexity: Option<&'a BTreeMap<String, usize>>,
    pub role: FrameworkRole,
    pub has_service: bool,
    pub has_repository: bool,
    pub is_test_class: bool,
}

impl<'a> SmellInput<'a> {
    #[must_use]
    pub fn from_class(
        class: &'a ClassDecl,
        complexity: &'a BTreeMap<String, usize>,
        role: FrameworkRole,
        is_test_class: bool,
    ) -> Self {
        Self {
            methods_count: class.methods.len(),
            fields_count: class.fields.len(),
            static_methods: class.methods.iter().filter(|m| m.is_static()).count(),
            method_lengths: class
                .methods
                .iter()
                .map(|m| (m.name.as_str(), m.body_length()))
                .collect(),
            complexity: Some(complexity),
            role,
            has_service: annotation::has(&class.annotations, "Service"),
            has_repository: annotation::has(&class.annotations, "Repository"),
            is_test_class,
        }
    }
}

#[must_use]
pub fn detect(input: &SmellInput<'_>, thresholds: &Thresholds) -> Vec<CodeSmell> {
    let mut smells = Vec::new();
    let methods = input.methods_count;
    let fields = input.fields_count;

    if methods > thresholds.class_size || fields > MAX_FIELDS {
        smells.push(CodeSmell::LargeClass);
    }

    smells.extend(
        input
            .method_lengths
            .iter()
            .filter(|(_, len)| *len > thresholds.method_length)
            .map(|(name, _)| CodeSmell::LongMethod((*name).to_string())),
    );

    if let Some(complexity) = input.complexity {
        smells.extend(
            complexity
                .iter()
                .filter(|(_, c)| **c > thresholds.complexity)
                .map(|(name, c)| CodeSmell::ComplexMethod {
                    name: name.clone(),
                    complexity: *c,
                }),
        );
    }

    if input.role == FrameworkRole::RestController && methods > HEAVY_CONTROLLER_METHODS {
        smells.push(CodeSmell::HeavyController);
    }
    if input.has_service && input.has_repository {
        smells.push(CodeSmell::AmbiguousComponent);
    }
    if methods > GOD_CLASS_MEMBERS && fields > GOD_CLASS_MEMBERS {
        smells.push(CodeSmell::GodClass);
    }
    if methods == 0 && fields > 0 {
        smells.push(CodeSmell::DataClass);
    }
    // static > methods / 2, kept in integers.
    if methods > 0 && input.static_methods * 2 > methods {
        smells.push(CodeSmell::ExcessiveStaticMethods);
    }

    if input.is_test_class {
        smells.retain(|s| !matches!(s, CodeSmell::LargeClass | CodeSmell::GodClass));
    }
    smells
}
