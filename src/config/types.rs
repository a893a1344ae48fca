use serde::{Deserialize, Serialize};

/// Substring include/exclude lists used for file paths and dependency coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl FilterSet {
    /// True when `subject` passes the filter: it matches an include pattern
    /// (or there are none) and matches no exclude pattern.
    #[must_use]
    pub fn admits(&self, subject: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|p| subject.contains(p.as_str())) {
            return false;
        }
        !self.exclude.iter().any(|p| subject.contains(p.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Allow-list of annotation names. Empty means no filtering.
    #[serde(default)]
    pub annotation_filters: Vec<String>,
    #[serde(default)]
    pub dependency_filters: FilterSet,
    #[serde(default)]
    pub file_path_filters: FilterSet,
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: usize,
    #[serde(default = "default_method_length_threshold")]
    pub method_length_threshold: usize,
    #[serde(default = "default_class_size_threshold")]
    pub class_size_threshold: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            annotation_filters: Vec::new(),
            dependency_filters: FilterSet::default(),
            file_path_filters: FilterSet::default(),
            complexity_threshold: default_complexity_threshold(),
            method_length_threshold: default_method_length_threshold(),
            class_size_threshold: default_class_size_threshold(),
            batch_size: default_batch_size(),
            output_file: default_output_file(),
        }
    }
}

/// Smell thresholds, split out so the detector does not need the whole config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub class_size: usize,
    pub method_length: usize,
    pub complexity: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            class_size: default_class_size_threshold(),
            method_length: default_method_length_threshold(),
            complexity: default_complexity_threshold(),
        }
    }
}

const fn default_complexity_threshold() -> usize { 10 }
const fn default_method_length_threshold() -> usize { 50 }
const fn default_class_size_threshold() -> usize { 10 }
const fn default_batch_size() -> usize { 50 }

fn default_output_file() -> String {
    "scan_summary.json".to_string()
}
