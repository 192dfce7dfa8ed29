//! Error types for the repository layer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No backing file for the requested repository
    #[error("Repository not found: {name} ({path})")]
    NotFound { name: String, path: String },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid path provided
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Repository content is not a mapping of record ids to records
    #[error("Repository `{name}` is not a record set")]
    NotARecordSet { name: String },

    /// Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse error (generic content conversion)
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl RepositoryError {
    /// Returns true when the repository itself does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

impl From<flatdata_core::CoreError> for RepositoryError {
    fn from(err: flatdata_core::CoreError) -> Self {
        RepositoryError::ParseError(err.to_string())
    }
}
