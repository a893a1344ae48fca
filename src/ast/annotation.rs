//! Annotation reference resolution.
//!
//! Parsers hand over an annotation name in one of two shapes: a bare
//! identifier (`@Service`) or a qualified one (`@org.acme.Service`). Both are
//! resolved once, at ingestion, into an [`AnnotationRef`] carrying a single
//! canonical name, so no downstream code has to care which shape it was.

use serde::Serialize;

/// The raw name of an annotation as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationName {
    Bare(String),
    Qualified { scope: String, member: String },
}

impl AnnotationName {
    /// `member` alone if unqualified, `scope.member` if qualified.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Bare(name) => name.clone(),
            Self::Qualified { scope, member } if scope.is_empty() => member.clone(),
            Self::Qualified { scope, member } => format!("{scope}.{member}"),
        }
    }
}

/// One literal argument of an annotation, e.g. `mappedBy = "owner"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationArg {
    pub key: Option<String>,
    pub value: String,
}

/// A resolved annotation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRef {
    name: String,
    args: Vec<AnnotationArg>,
}

impl AnnotationRef {
    #[must_use]
    pub fn resolve(raw: &AnnotationName, args: Vec<AnnotationArg>) -> Self {
        Self {
            name: raw.canonical(),
            args,
        }
    }

    /// Shorthand for a bare annotation without arguments.
    #[must_use]
    pub fn bare(name: &str) -> Self {
        Self::resolve(&AnnotationName::Bare(name.to_string()), Vec::new())
    }

    /// Bare annotation with positional (unkeyed) literal values.
    #[must_use]
    pub fn with_values(name: &str, values: &[&str]) -> Self {
        let args = values
            .iter()
            .map(|v| AnnotationArg {
                key: None,
                value: (*v).to_string(),
            })
            .collect();
        Self::resolve(&AnnotationName::Bare(name.to_string()), args)
    }

    /// Bare annotation with keyed literal values.
    #[must_use]
    pub fn with_pairs(name: &str, pairs: &[(&str, &str)]) -> Self {
        let args = pairs
            .iter()
            .map(|(k, v)| AnnotationArg {
                key: Some((*k).to_string()),
                value: (*v).to_string(),
            })
            .collect();
        Self::resolve(&AnnotationName::Bare(name.to_string()), args)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn args(&self) -> &[AnnotationArg] {
        &self.args
    }

    /// Literal argument values in source order, keyed or not.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.args.iter().map(|a| a.value.clone()).collect()
    }

    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.args.first().map(|a| a.value.as_str())
    }

    /// Value of the argument with the given key.
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|a| a.key.as_deref() == Some(key))
            .map(|a| a.value.as_str())
    }

    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    #[must_use]
    pub fn is_any(&self, names: &[&str]) -> bool {
        names.contains(&self.name.as_str())
    }
}

/// Canonical names of a list of annotations, in order.
#[must_use]
pub fn names(annotations: &[AnnotationRef]) -> Vec<String> {
    annotations.iter().map(|a| a.name().to_string()).collect()
}

/// Whether any annotation in the list has the given canonical name.
#[must_use]
pub fn has(annotations: &[AnnotationRef], name: &str) -> bool {
    annotations.iter().any(|a| a.is(name))
}
