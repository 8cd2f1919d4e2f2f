//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service could not be reached or answered with an error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// External service answered with data that could not be understood
    #[error("Invalid data from external service: {0}")]
    InvalidData(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Invalid operation or input
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Monitor instance not registered
    #[error("Instance not found: {0}")]
    InstanceNotFound(String),

    /// Monitor instance registered twice
    #[error("Instance already registered: {0}")]
    DuplicateInstance(String),

    /// Sink rejected an update
    #[error("Sink error: {0}")]
    Sink(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if the next cycle may succeed where this one failed
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ExternalService(_) | Self::InvalidData(_)
        )
    }
}
