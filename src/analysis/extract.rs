// src/analysis/extract.rs
//! Structural copies of class members and dependency-injection detection.

use crate::ast::{annotation, ClassDecl, Parameter, TypeRef};
use crate::types::{FieldDescriptor, MethodDescriptor, ParameterDescriptor};

/// Annotations that inject a field.
const FIELD_INJECTION: &[&str] = &["Autowired", "Inject", "Resource"];
/// Annotations that inject every parameter of a constructor or setter.
const PARAM_INJECTION: &[&str] = &["Autowired", "Inject"];

fn type_name(ty: Option<&TypeRef>, fallback: &str) -> String {
    ty.map_or_else(|| fallback.to_string(), |t| t.name.clone())
}

#[must_use]
pub fn fields(class: &ClassDecl) -> Vec<FieldDescriptor> {
    class
        .fields
        .iter()
        .map(|f| FieldDescriptor {
            names: f.declarators.clone(),
            field_type: type_name(f.ty.as_ref(), "Unknown"),
            annotations: annotation::names(&f.annotations),
            modifiers: f.modifiers.clone(),
        })
        .collect()
}

#[must_use]
pub fn methods(class: &ClassDecl) -> Vec<MethodDescriptor> {
    class
        .methods
        .iter()
        .map(|m| MethodDescriptor {
            name: m.name.clone(),
            return_type: type_name(m.return_type.as_ref(), "void"),
            parameters: m.parameters.iter().map(parameter).collect(),
            annotations: annotation::names(&m.annotations),
            modifiers: m.modifiers.clone(),
            body_length: m.body_length(),
        })
        .collect()
}

fn parameter(p: &Parameter) -> ParameterDescriptor {
    ParameterDescriptor {
        name: p.name.clone(),
        param_type: type_name(p.ty.as_ref(), "Unknown"),
    }
}

/// Declared types of every injected dependency: annotated fields, then
/// parameters of annotated constructors, then parameters of annotated methods.
#[must_use]
pub fn service_injections(class: &ClassDecl) -> Vec<String> {
    let mut injected = Vec::new();

    for field in &class.fields {
        let count = field
            .annotations
            .iter()
            .filter(|a| a.is_any(FIELD_INJECTION))
            .count();
        for _ in 0..count {
            injected.push(type_name(field.ty.as_ref(), "Unknown"));
        }
    }

    let injecting_params = class
        .constructors
        .iter()
        .map(|c| (&c.annotations, &c.parameters))
        .chain(class.methods.iter().map(|m| (&m.annotations, &m.parameters)));

    for (annotations, params) in injecting_params {
        let count = annotations.iter().filter(|a| a.is_any(PARAM_INJECTION)).count();
        for _ in 0..count {
            injected.extend(params.iter().map(|p| type_name(p.ty.as_ref(), "Unknown")));
        }
    }

    injected
}
