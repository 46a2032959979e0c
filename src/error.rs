//! Error types for the snailpay library

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for snailpay operations
pub type Result<T> = std::result::Result<T, SnailError>;

/// Main error type for snailpay operations
#[derive(Error, Debug)]
pub enum SnailError {
    /// The verification code was malformed or the service rejected it.
    ///
    /// Returned for every non-200 answer to a verification request, whatever
    /// the server put in the body, so callers can match on it.
    #[error("The payment was invalid.")]
    InvalidCode,

    /// The request never produced a readable response
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status
    #[error("{message}")]
    RemoteFailure { status: u16, message: String },

    /// A URL could not be built from the configured base
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SnailError {
    /// Create a remote failure error
    pub fn remote_failure(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteFailure {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this is the verification sentinel
    pub fn is_invalid_code(&self) -> bool {
        matches!(self, Self::InvalidCode)
    }

    /// HTTP status reported by the service, if it answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}
