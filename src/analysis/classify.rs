// src/analysis/classify.rs
//! Coarse classification of a class from its annotations and file path.

use std::path::Path;

use crate::ast::annotation;
use crate::ast::AnnotationRef;
use crate::types::{FrameworkRole, Layer};

/// Annotations that mark a test class.
const TEST_MARKERS: &[&str] = &[
    "Test",
    "SpringBootTest",
    "WebMvcTest",
    "DataJpaTest",
    "JsonTest",
    "RestClientTest",
];

/// Path keywords for bounded contexts, in match order.
const CONTEXTS: &[(&str, &str)] = &[
    ("booking", "Booking Context"),
    ("passenger", "Passenger Context"),
    ("flight", "Flight Context"),
];

/// Path segments for domains, in match order.
const DOMAINS: &[(&str, &str)] = &[
    ("booking", "Booking Domain"),
    ("flight", "Flight Domain"),
    ("passenger", "Passenger Domain"),
];

/// Lowercased path with forward slashes.
fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

/// First role, in fixed priority order, whose marker annotation is present.
#[must_use]
pub fn framework_role(annotations: &[AnnotationRef]) -> FrameworkRole {
    FrameworkRole::PRIORITY
        .into_iter()
        .find(|role| annotation::has(annotations, role.marker()))
        .unwrap_or(FrameworkRole::Unknown)
}

#[must_use]
pub fn layer(path: &Path) -> Layer {
    let p = normalize(path);
    let rules = [
        ("controller", Layer::Controller),
        ("service", Layer::Service),
        ("repository", Layer::Repository),
        ("entity", Layer::Entity),
    ];
    rules
        .into_iter()
        .find(|(key, _)| p.contains(&format!("/{key}/")) || p.ends_with(&format!("{key}.java")))
        .map_or(Layer::Unknown, |(_, layer)| layer)
}

#[must_use]
pub fn bounded_context(path: &Path) -> String {
    let p = normalize(path);
    CONTEXTS
        .iter()
        .find(|(key, _)| p.contains(key))
        .map_or("Unknown Context", |(_, label)| *label)
        .to_string()
}

#[must_use]
pub fn domain(path: &Path) -> String {
    let p = normalize(path);
    let segments: Vec<&str> = p.split('/').collect();
    DOMAINS
        .iter()
        .find(|(key, _)| segments.contains(key))
        .map_or("Unknown Domain", |(_, label)| *label)
        .to_string()
}

#[must_use]
pub fn is_test_class(annotations: &[AnnotationRef], path: &Path) -> bool {
    annotations.iter().any(|a| a.is_any(TEST_MARKERS)) || normalize(path).contains("test")
}
