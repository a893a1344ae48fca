use std::path::Path;
use tree_sitter::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Java,
}

impl Lang {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "java" => Some(Self::Java),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_ext(path.extension().and_then(|s| s.to_str()).unwrap_or(""))
    }

    #[must_use]
    pub fn grammar(self) -> Language {
        match self {
            Self::Java => tree_sitter_java::language(),
        }
    }
}

#[must_use]
pub fn is_comment(kind: &str) -> bool {
    matches!(kind, "comment" | "line_comment" | "block_comment")
}

/// Literal expression kinds. Class literals are not included.
#[must_use]
pub fn is_literal(kind: &str) -> bool {
    matches!(
        kind,
        "string_literal"
            | "character_literal"
            | "text_block"
            | "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
            | "decimal_floating_point_literal"
            | "hex_floating_point_literal"
            | "null_literal"
            | "true"
            | "false"
    )
}

/// Fields whose children are declarations, not expressions.
#[must_use]
pub fn is_declaration_field(field: &str) -> bool {
    matches!(
        field,
        "name" | "parameters" | "type" | "type_arguments" | "type_parameters" | "dimensions"
    )
}
