//! Error types.
//!
//! Only collaborator failures are fatal (`ScanError`, `ConfigError`).
//! Per-file read failures are values (`FileError`) carried in the scan
//! result next to the routes of the files that did load.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal scan failures. Reported once; no file is processed afterwards.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("project path does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("project path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to build worker pool: {message}")]
    WorkerPool { message: String },
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

/// A single file that could not be read or decoded.
///
/// Serialized as `{ "file": ..., "message": ... }` in scan output.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{file}: {message}")]
pub struct FileError {
    pub file: String,
    pub message: String,
}

impl FileError {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Wrap an I/O failure for `file`.
    pub fn io(file: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(file, err.to_string())
    }
}
