//! Method security annotations and aspect advice.

use crate::ast::{annotation, ClassDecl};
use crate::types::{Advice, AspectInfo, SecuredMethod, SecurityInfo};

const SECURITY: &[&str] = &["PreAuthorize", "PostAuthorize", "Secured", "RolesAllowed"];
const ADVICE: &[&str] = &[
    "Before",
    "After",
    "Around",
    "AfterReturning",
    "AfterThrowing",
    "Pointcut",
];

#[must_use]
pub fn security(class: &ClassDecl) -> Option<SecurityInfo> {
    let secured_methods: Vec<SecuredMethod> = class
        .methods
        .iter()
        .flat_map(|m| {
            m.annotations
                .iter()
                .filter(|a| a.is_any(SECURITY))
                .map(|a| SecuredMethod {
                    method: m.name.clone(),
                    annotation: a.name().to_string(),
                    value: a.values(),
                })
        })
        .collect();

    if secured_methods.is_empty() {
        None
    } else {
        Some(SecurityInfo { secured_methods })
    }
}

#[must_use]
pub fn aspects(class: &ClassDecl) -> Vec<AspectInfo> {
    if !annotation::has(&class.annotations, "Aspect") {
        return Vec::new();
    }
    let advices = class
        .methods
        .iter()
        .flat_map(|m| {
            m.annotations
                .iter()
                .filter(|a| a.is_any(ADVICE))
                .map(|a| Advice {
                    advice_type: a.name().to_string(),
                    method: m.name.clone(),
                    pointcut: a.values(),
                })
        })
        .collect();
    vec![AspectInfo {
        name: class.name.clone(),
        advices,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AnnotationRef, MethodDecl};

    #[test]
    fn test_secured_methods() {
        let mut class = ClassDecl::new("AdminService");
        class.methods.push(MethodDecl {
            name: "wipe".into(),
            annotations: vec![AnnotationRef::with_values("PreAuthorize", &["hasRole('ADMIN')"])],
            ..MethodDecl::default()
        });
        class.methods.push(MethodDecl {
            name: "read".into(),
            ..MethodDecl::default()
        });
        let info = security(&class).unwrap();
        assert_eq!(info.secured_methods.len(), 1);
        assert_eq!(info.secured_methods[0].method, "wipe");
        assert!(security(&ClassDecl::new("Plain")).is_none());
    }

    #[test]
    fn test_aspect_without_advice_still_reported() {
        let mut class = ClassDecl::new("Tracing");
        class.annotations.push(AnnotationRef::bare("Aspect"));
        let found = aspects(&class);
        assert_eq!(found.len(), 1);
        assert!(found[0].advices.is_empty());
        assert!(aspects(&ClassDecl::new("NotAspect")).is_empty());
    }

    #[test]
    fn test_aspect_advices() {
        let mut class = ClassDecl::new("Timing");
        class.annotations.push(AnnotationRef::bare("Aspect"));
        class.methods.push(MethodDecl {
            name: "time".into(),
            annotations: vec![AnnotationRef::with_values("Around", &["execution(* *(..))"])],
            ..MethodDecl::default()
        });
        let found = aspects(&class);
        assert_eq!(found[0].advices[0].advice_type, "Around");
        assert_eq!(found[0].advices[0].pointcut, vec!["execution(* *(..))".to_string()]);
    }
}
