//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The caller supplied malformed data.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable description of what was rejected.
        message: String,
        /// The lower-level rejection this error rewraps, if any.
        #[source]
        source: Option<Box<DomainError>>,
    },

    /// The operation is structurally unavailable on this value.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// No entity exists under the requested identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Creates an `InvalidArgument` error without a cause.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an `InvalidArgument` error that rewraps `cause`.
    #[must_use]
    pub fn invalid_argument_caused_by(message: impl Into<String>, cause: DomainError) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Creates an `Unsupported` error.
    #[must_use]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    /// Returns `true` for errors caused by bad caller input.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` for errors reporting an unavailable operation.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
