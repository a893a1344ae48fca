use crate::ast::ClassDecl;
use crate::types::DocumentationCoverage;

/// Share of methods preceded by a `/** ... */` comment, as a percentage.
#[must_use]
pub fn documentation_coverage(class: &ClassDecl) -> Option<DocumentationCoverage> {
    let total_methods = class.methods.len();
    if total_methods == 0 {
        return None;
    }
    let documented_methods = class.methods.iter().filter(|m| m.documented).count();
    #[allow(clippy::cast_precision_loss)]
    let coverage = documented_methods as f64 / total_methods as f64 * 100.0;
    Some(DocumentationCoverage {
        documented_methods,
        total_methods,
        coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::MethodDecl;

    #[test]
    fn test_coverage() {
        let mut class = ClassDecl::new("A");
        assert!(documentation_coverage(&class).is_none());

        class.methods.push(MethodDecl { documented: true, ..MethodDecl::default() });
        class.methods.push(MethodDecl::default());
        let cov = documentation_coverage(&class).unwrap();
        assert_eq!(cov.documented_methods, 1);
        assert_eq!(cov.total_methods, 2);
        assert!((cov.coverage - 50.0).abs() < f64::EPSILON);
    }
}
