//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while normalizing expectations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URI is invalid or malformed.
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// A value could not be converted into its structural representation.
    #[error("value conversion failed: {0}")]
    ValueConversion(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
