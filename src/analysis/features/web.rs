// src/analysis/features/web.rs
//! HTTP endpoints, bean factories and profile gates.

use crate::ast::{annotation, ClassDecl};
use crate::types::SpringBean;

const MAPPINGS: &[&str] = &[
    "RequestMapping",
    "GetMapping",
    "PostMapping",
    "PutMapping",
    "DeleteMapping",
    "PatchMapping",
];

const PROFILE_GATES: &[&str] = &["Profile", "ConditionalOnProperty", "Conditional"];

/// `GetMapping` -> `GET`, `RequestMapping` -> `REQUEST`.
fn verb(mapping: &str) -> String {
    mapping.replace("Mapping", "").to_uppercase()
}

fn join_paths(base: &str, sub: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), sub.trim_start_matches('/')).replace("//", "/")
}

/// `"<VERBS> <path>"` for every mapped method, crossed with class-level prefixes.
///
/// Methods without a mapping annotation are not endpoints and contribute
/// nothing; there is no verb-less `" /"` entry for them.
#[must_use]
pub fn api_endpoints(class: &ClassDecl) -> Vec<String> {
    let mut prefixes: Vec<String> = class
        .annotations
        .iter()
        .filter(|a| a.is("RequestMapping"))
        .flat_map(|a| a.values())
        .collect();
    if prefixes.is_empty() {
        prefixes.push("/".to_string());
    }

    let mut endpoints = Vec::new();
    for method in &class.methods {
        let mut paths = Vec::new();
        let mut verbs = Vec::new();
        for a in method.annotations.iter().filter(|a| a.is_any(MAPPINGS)) {
            let values = a.values();
            if values.is_empty() {
                paths.push("/".to_string());
            } else {
                paths.extend(values);
            }
            verbs.push(verb(a.name()));
        }
        if verbs.is_empty() {
            continue;
        }
        let verbs = verbs.join(",");
        for prefix in &prefixes {
            for path in &paths {
                endpoints.push(format!("{verbs} {}", join_paths(prefix, path)));
            }
        }
    }
    endpoints
}

/// `@Bean` factory methods.
#[must_use]
pub fn spring_beans(class: &ClassDecl) -> Vec<SpringBean> {
    class
        .methods
        .iter()
        .filter(|m| annotation::has(&m.annotations, "Bean"))
        .map(|m| SpringBean {
            name: m.name.clone(),
            return_type: m
                .return_type
                .as_ref()
                .map_or_else(|| "Unknown".to_string(), |t| t.name.clone()),
        })
        .collect()
}

#[must_use]
pub fn profiles(class: &ClassDecl) -> Vec<String> {
    class
        .annotations
        .iter()
        .filter(|a| a.is_any(PROFILE_GATES))
        .flat_map(|a| a.values())
        .collect()
}
