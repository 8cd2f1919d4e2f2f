//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Upstream category code outside the known taxonomy
    #[error("Unknown warning category code: {0}")]
    UnknownCategoryCode(i64),

    /// Upstream severity code outside the known taxonomy
    #[error("Unknown warning severity code: {0}")]
    UnknownSeverityCode(i64),

    /// Lead time must not be negative
    #[error("Invalid lead time: {0}")]
    InvalidLeadTime(String),

    /// Unix timestamp cannot be represented
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}
