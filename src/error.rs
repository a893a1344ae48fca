// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    /// File-level failure: the file could not be read or parsed. The file is skipped.
    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Class-level failure: one class declaration could not be scanned.
    #[error("Error scanning class {class_name} in {path}: {reason}")]
    ClassScan {
        class_name: String,
        path: PathBuf,
        reason: String,
    },

    /// Unexpected fault inside a batch worker. The rest of that batch is lost.
    #[error("Batch {index} generated an exception: {reason}")]
    Batch { index: usize, reason: String },

    /// The only fatal scan condition: nothing to scan at all.
    #[error("No Java files found in {0}")]
    NoSourceFiles(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

// Allow `?` on std::io::Error by converting to ScanError::Io with unknown path.
impl From<std::io::Error> for ScanError {
    fn from(source: std::io::Error) -> Self {
        ScanError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for ScanError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map_or_else(|| PathBuf::from("<unknown>"), PathBuf::from);
        match e.into_io_error() {
            Some(source) => ScanError::Io { source, path },
            None => ScanError::Parse {
                path,
                reason: "filesystem loop detected".to_string(),
            },
        }
    }
}
