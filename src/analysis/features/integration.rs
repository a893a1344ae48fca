// src/analysis/features/integration.rs
//! Outbound HTTP clients, externalized configuration and cross-package calls.

use crate::ast::{annotation, ClassDecl, NodeKind};
use crate::types::{ConfigProperty, ExternalApiCall, ModuleCoupling};

const HTTP_CLIENTS: &[&str] = &["restTemplate", "webClient"];

#[must_use]
pub fn external_api_calls(class: &ClassDecl) -> Vec<ExternalApiCall> {
    let mut calls: Vec<ExternalApiCall> = class
        .fields
        .iter()
        .filter(|f| annotation::has(&f.annotations, "FeignClient"))
        .map(|f| ExternalApiCall {
            usage: "Feign Client".into(),
            field: Some(f.first_name().to_string()),
            client_type: Some(f.type_name().unwrap_or_default().to_string()),
            method: None,
            call: None,
            target: None,
        })
        .collect();

    for method in &class.methods {
        for inv in method.body_nodes().filter_map(|n| n.as_invocation()) {
            let Some(q) = inv.qualifier.as_deref() else {
                continue;
            };
            if !HTTP_CLIENTS.contains(&q) {
                continue;
            }
            let target = match inv.arguments.first().map(|a| &a.kind) {
                Some(NodeKind::Literal(text)) => text.clone(),
                _ => "Unknown".to_string(),
            };
            calls.push(ExternalApiCall {
                usage: "External API Call".into(),
                field: None,
                client_type: None,
                method: Some(method.name.clone()),
                call: Some(inv.member.clone()),
                target: Some(target),
            });
        }
    }
    calls
}

/// `@Value("${key}")` fields.
#[must_use]
pub fn config_properties(class: &ClassDecl) -> Vec<ConfigProperty> {
    class
        .fields
        .iter()
        .flat_map(|f| {
            f.annotations
                .iter()
                .filter(|a| a.is("Value"))
                .filter_map(|a| a.first_value())
                .map(|v| ConfigProperty {
                    field: f.first_name().to_string(),
                    property: v.to_string(),
                })
        })
        .collect()
}

/// Invocations through a dotted receiver, reported by receiver package.
#[must_use]
pub fn module_coupling(class: &ClassDecl) -> Vec<ModuleCoupling> {
    let mut coupling = Vec::new();
    for method in &class.methods {
        for inv in method.body_nodes().filter_map(|n| n.as_invocation()) {
            let Some((package, _)) = inv.qualifier.as_deref().and_then(|q| q.rsplit_once('.'))
            else {
                continue;
            };
            coupling.push(ModuleCoupling {
                method: method.name.clone(),
                coupled_module: package.to_string(),
            });
        }
    }
    coupling
}
