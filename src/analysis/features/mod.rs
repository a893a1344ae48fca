// src/analysis/features/mod.rs
//! Framework feature extractors. Each one reads a class declaration and
//! returns what it found; [`collect`] folds them into [`FeatureBlocks`].

pub mod docs;
pub mod integration;
pub mod messaging;
pub mod persistence;
pub mod security;
pub mod web;

use crate::ast::ClassDecl;
use crate::types::{non_empty, FeatureBlocks, FrameworkRole};

/// Runs every extractor. Empty results stay `None`.
#[must_use]
pub fn collect(class: &ClassDecl, role: FrameworkRole) -> FeatureBlocks {
    let spring_beans = match role {
        FrameworkRole::Configuration | FrameworkRole::Component => web::spring_beans(class),
        _ => Vec::new(),
    };

    FeatureBlocks {
        spring_beans: non_empty(spring_beans),
        security: security::security(class),
        aspects: non_empty(security::aspects(class)),
        profiles: non_empty(web::profiles(class)),
        database_interactions: non_empty(persistence::database_interactions(class)),
        database_entities: non_empty(persistence::database_entities(class)),
        messaging_usage: non_empty(messaging::messaging_usage(class)),
        external_api_calls: non_empty(integration::external_api_calls(class)),
        config_properties: non_empty(integration::config_properties(class)),
        module_coupling: non_empty(integration::module_coupling(class)),
        documentation_coverage: docs::documentation_coverage(class),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AnnotationRef, MethodDecl, TypeRef};

    fn bean_factory() -> ClassDecl {
        let mut class = ClassDecl::new("AppConfig");
        class.methods.push(MethodDecl {
            name: "clock".into(),
            return_type: Some(TypeRef::named("Clock")),
            annotations: vec![AnnotationRef::bare("Bean")],
            ..MethodDecl::default()
        });
        class
    }

    #[test]
    fn test_beans_only_for_configuration_roles() {
        let class = bean_factory();
        assert!(collect(&class, FrameworkRole::Configuration).spring_beans.is_some());
        assert!(collect(&class, FrameworkRole::Service).spring_beans.is_none());
    }

    #[test]
    fn test_empty_class_has_no_blocks() {
        assert_eq!(collect(&ClassDecl::new("Empty"), FrameworkRole::Unknown), FeatureBlocks::default());
    }
}
