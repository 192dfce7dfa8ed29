//! Error types for flatdata core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A mapping carries a `repository` key but cannot be read as a relation
    #[error("Malformed relation declaration: {reason}")]
    MalformedRelationDeclaration { reason: String },

    /// Filter operator outside the supported comparison set
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl CoreError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CoreError::MalformedRelationDeclaration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
