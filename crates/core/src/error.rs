//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (validation, blank codes).
/// Malformed table cells are *not* errors: they are coerced to "missing"
/// and excluded where they are consumed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a non-positive horizon).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A SKU or warehouse code was invalid (e.g. blank).
    #[error("invalid code: {0}")]
    InvalidCode(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_code(msg: impl Into<String>) -> Self {
        Self::InvalidCode(msg.into())
    }
}
