// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{FilterSet, ScanConfig, Thresholds};
use crate::error::{Result, ScanError};
use std::path::Path;

/// Name of the project-local configuration file.
pub const CONFIG_FILE: &str = "springscope.toml";

impl ScanConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `springscope.toml` from `project_dir`, falling back to defaults.
    #[must_use]
    pub fn load(project_dir: &Path) -> Self {
        io::load_or_default(&project_dir.join(CONFIG_FILE))
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML or a value has the wrong type.
    pub fn parse_toml(content: &str) -> Result<Self> {
        io::parse_toml(content)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error if `batch_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ScanError::Config("batch_size must be at least 1".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            class_size: self.class_size_threshold,
            method_length: self.method_length_threshold,
            complexity: self.complexity_threshold,
        }
    }

    /// Returns true when the class passes the annotation allow-list.
    #[must_use]
    pub fn admits_annotations<S: AsRef<str>>(&self, annotations: &[S]) -> bool {
        if self.annotation_filters.is_empty() {
            return true;
        }
        annotations
            .iter()
            .any(|a| self.annotation_filters.iter().any(|f| f == a.as_ref()))
    }
}
