//! Error types for the sync server.

use liftsync_protocol::ValidationError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the sync server.
///
/// All variants surface directly to the caller; there is no internal
/// retry. The store layer itself never originates domain errors, so
/// malformed input is caught before any row is written.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Token absent, or its bound device does not match the caller.
    /// Retrying will not help unless the caller re-registers.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Reference to an unknown entity.
    #[error("not found: {0}")]
    NotFound(String),

    /// An inbound row is missing a required field or violates a domain
    /// constraint. The entire call is rejected, no rows were written.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] ValidationError),

    /// The request itself is unacceptable (e.g. an oversized batch).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ServerError {
    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns true if this is a client error (4xx at a transport
    /// boundary). Every current variant is; the method exists so a
    /// boundary layer can map kinds without matching variants.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::Unauthorized(_)
                | ServerError::NotFound(_)
                | ServerError::MalformedInput(_)
                | ServerError::InvalidRequest(_)
        )
    }
}
