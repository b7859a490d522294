//! Error types for the Pricecast client

use thiserror::Error;

/// Failures surfaced by the HTTP transport collaborator.
///
/// The transport never retries; each variant maps one observed failure
/// mode of a single request.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request exceeded the fixed transport timeout
    #[error("Request timed out")]
    Timeout,

    /// The remote service could not be reached at all
    #[error("Network unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success HTTP status
    #[error("HTTP {code}: {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body, if any
        body: String,
    },
}

/// Client-wide error type
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller input violated a precondition, raised before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The transport collaborator failed; propagated unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    /// True if this error should be shown to the user verbatim
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
