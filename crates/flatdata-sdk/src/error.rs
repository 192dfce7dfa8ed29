//! SDK error types

use flatdata_core::CoreError;
use flatdata_repository::RepositoryError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Loading or caching a repository failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Malformed relation declaration or unknown filter operator
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The selected repository has no such record
    #[error("Record `{record}` not found in repository `{repository}`")]
    RecordNotFound { record: String, repository: String },

    /// The current record or property has no such child
    #[error("Property `{property}` not found on `{record}`")]
    PropertyNotFound { property: String, record: String },

    /// Filtering after a record was selected
    #[error("Query is already scoped to a single record")]
    AlreadyScopedToRecord,

    /// Operation not allowed in the cursor's current state
    #[error("Cannot {operation} in state {state}")]
    InvalidStateTransition {
        operation: &'static str,
        state: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SdkError {
    /// Returns true when a repository file does not exist
    pub fn is_repository_not_found(&self) -> bool {
        matches!(self, SdkError::Repository(e) if e.is_not_found())
    }

    pub fn is_malformed_relation(&self) -> bool {
        matches!(
            self,
            SdkError::Core(CoreError::MalformedRelationDeclaration { .. })
        )
    }

    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self, SdkError::Core(CoreError::UnsupportedOperator(_)))
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
