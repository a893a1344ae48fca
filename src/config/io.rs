// src/config/io.rs
use super::types::ScanConfig;
use crate::error::{Result, ScanError};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Parses TOML content into a validated config.
///
/// # Errors
/// Returns error on malformed TOML or an invalid value.
pub fn parse_toml(content: &str) -> Result<ScanConfig> {
    let config: ScanConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Reads and parses a config file.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_file(path: &Path) -> Result<ScanConfig> {
    let content = fs::read_to_string(path).map_err(|e| ScanError::io(e, path))?;
    parse_toml(&content)
}

/// Loads a config file, using defaults when it is absent or broken.
#[must_use]
pub fn load_or_default(path: &Path) -> ScanConfig {
    if !path.exists() {
        warn!("Using default configuration parameters.");
        return ScanConfig::default();
    }
    match load_file(path) {
        Ok(config) => {
            info!("Successfully loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            error!("Error loading configuration: {e}");
            ScanConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() -> Result<()> {
        let c = parse_toml("complexity_threshold = 4\nbatch_size = 2")?;
        assert_eq!(c.complexity_threshold, 4);
        assert_eq!(c.batch_size, 2);
        assert_eq!(c.method_length_threshold, 50);
        Ok(())
    }

    #[test]
    fn test_nested_filters() -> Result<()> {
        let c = parse_toml(
            "annotation_filters = [\"Service\"]\n[file_path_filters]\nexclude = [\"generated\"]",
        )?;
        assert_eq!(c.annotation_filters, vec!["Service".to_string()]);
        assert_eq!(c.file_path_filters.exclude, vec!["generated".to_string()]);
        assert!(c.file_path_filters.include.is_empty());
        Ok(())
    }

    #[test]
    fn test_broken_file_falls_back() {
        let d = tempfile::tempdir().unwrap();
        let p = d.path().join("springscope.toml");
        fs::write(&p, "batch_size = \"many\"").unwrap();
        assert_eq!(load_or_default(&p), ScanConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let d = tempfile::tempdir().unwrap();
        assert_eq!(load_or_default(&d.path().join("nope.toml")), ScanConfig::default());
    }
}
