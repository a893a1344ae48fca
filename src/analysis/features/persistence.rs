// src/analysis/features/persistence.rs
//! ORM entities, their associations, and repository query methods.

use crate::ast::{annotation, ClassDecl, FieldDecl};
use crate::types::{DatabaseInteraction, EntityField, EntityInfo, EntityRelationship};

const ASSOCIATIONS: &[&str] = &["OneToMany", "ManyToOne", "ManyToMany", "OneToOne"];

fn is_data_class(class: &ClassDecl) -> bool {
    annotation::has(&class.annotations, "Entity")
        || annotation::has(&class.annotations, "Repository")
        || class.implements.iter().any(|t| t.name == "JpaRepository")
}

/// One entry per method of an entity or repository class.
#[must_use]
pub fn database_interactions(class: &ClassDecl) -> Vec<DatabaseInteraction> {
    if !is_data_class(class) {
        return Vec::new();
    }
    class
        .methods
        .iter()
        .map(|m| {
            let explicit = m
                .annotations
                .iter()
                .find(|a| a.is("Query"))
                .and_then(|a| a.first_value())
                .map(str::to_string);
            DatabaseInteraction {
                name: m.name.clone(),
                query: explicit.unwrap_or_else(|| {
                    format!("Derived query based on method name: {}", m.name)
                }),
            }
        })
        .collect()
}

#[must_use]
pub fn database_entities(class: &ClassDecl) -> Vec<EntityInfo> {
    if !annotation::has(&class.annotations, "Entity") {
        return Vec::new();
    }
    let table_name = class
        .annotations
        .iter()
        .filter(|a| a.is("Table"))
        .find_map(|a| a.first_value())
        .map(str::to_string);

    let mut fields = Vec::new();
    let mut relationships = Vec::new();
    for field in &class.fields {
        let column_name = field
            .annotations
            .iter()
            .filter(|a| a.is("Column"))
            .find_map(|a| a.first_value())
            .map(str::to_string);
        fields.push(EntityField {
            name: field.first_name().to_string(),
            field_type: field.type_name().unwrap_or("Unknown").to_string(),
            column_name,
            annotations: annotation::names(&field.annotations),
        });
        if let Some(rel) = entity_relationship(field) {
            relationships.push(rel);
        }
    }

    vec![EntityInfo {
        table_name,
        fields,
        relationships,
    }]
}

/// The first association annotation on a field, if any.
///
/// The target entity is the `targetEntity` argument, else the first generic
/// argument of the field type (`List<Pet>` -> `Pet`), else the field type.
#[must_use]
pub fn entity_relationship(field: &FieldDecl) -> Option<EntityRelationship> {
    let a = field.annotations.iter().find(|a| a.is_any(ASSOCIATIONS))?;
    let inferred = field.ty.as_ref().map(|t| {
        t.arguments
            .first()
            .map_or_else(|| t.name.clone(), |arg| arg.name.clone())
    });
    let target_entity = a
        .arg("targetEntity")
        .map(str::to_string)
        .or(inferred)
        .unwrap_or_else(|| "Unknown".to_string());

    Some(EntityRelationship {
        association: a.name().to_string(),
        field: field.first_name().to_string(),
        target_entity,
        mapped_by: a.arg("mappedBy").map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AnnotationRef, MethodDecl, TypeRef};

    fn owner_entity() -> ClassDecl {
        let mut class = ClassDecl::new("Owner");
        class.annotations.push(AnnotationRef::bare("Entity"));
        class.annotations.push(AnnotationRef::with_pairs("Table", &[("name", "owners")]));
        class.fields.push(FieldDecl {
            ty: Some(TypeRef::named("String")),
            declarators: vec!["name".into()],
            annotations: vec![AnnotationRef::with_pairs("Column", &[("name", "owner_name")])],
            modifiers: Vec::new(),
        });
        class.fields.push(FieldDecl {
            ty: Some(TypeRef::generic("List", &["Pet"])),
            declarators: vec!["pets".into()],
            annotations: vec![AnnotationRef::with_pairs("OneToMany", &[("mappedBy", "owner")])],
            modifiers: Vec::new(),
        });
        class
    }

    #[test]
    fn test_entity_shape() {
        let entities = database_entities(&owner_entity());
        assert_eq!(entities.len(), 1);
        let e = &entities[0];
        assert_eq!(e.table_name.as_deref(), Some("owners"));
        assert_eq!(e.fields[0].column_name.as_deref(), Some("owner_name"));
        assert_eq!(e.relationships.len(), 1);
        assert_eq!(e.relationships[0].target_entity, "Pet");
        assert_eq!(e.relationships[0].mapped_by.as_deref(), Some("owner"));
    }

    #[test]
    fn test_explicit_target_entity_wins() {
        let field = FieldDecl {
            ty: Some(TypeRef::named("Object")),
            declarators: vec!["vet".into()],
            annotations: vec![AnnotationRef::with_pairs("ManyToOne", &[("targetEntity", "Vet")])],
            modifiers: Vec::new(),
        };
        assert_eq!(entity_relationship(&field).unwrap().target_entity, "Vet");
    }

    #[test]
    fn test_repository_queries() {
        let mut class = ClassDecl::new("OwnerRepository");
        class.annotations.push(AnnotationRef::bare("Repository"));
        class.methods.push(MethodDecl {
            name: "findByLastName".into(),
            ..MethodDecl::default()
        });
        class.methods.push(MethodDecl {
            name: "custom".into(),
            annotations: vec![AnnotationRef::with_values("Query", &["SELECT o FROM Owner o"])],
            ..MethodDecl::default()
        });
        let found = database_interactions(&class);
        assert_eq!(found[0].query, "Derived query based on method name: findByLastName");
        assert_eq!(found[1].query, "SELECT o FROM Owner o");
        assert!(database_interactions(&ClassDecl::new("Plain")).is_empty());
    }
}
