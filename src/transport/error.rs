//! Transport error classification.

use thiserror::Error;

/// Errors raised after a body has been handed to the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to reach the server
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded total timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Server answered with a non-success status
    #[error("Server error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be read
    #[error("Failed to read response: {0}")]
    Response(String),
}

impl TransportError {
    /// Error type string for logs and error templates.
    pub fn error_type(&self) -> &'static str {
        match self {
            TransportError::Connection { .. } => "connection_error",
            TransportError::Timeout { .. } => "request_timeout",
            TransportError::Status { .. } => "status_error",
            TransportError::InvalidRequest(_) => "invalid_request",
            TransportError::Response(_) => "response_error",
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_type() {
        let err = TransportError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.error_type(), "status_error");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Server error: 500 - boom");
    }

    #[test]
    fn timeout_has_no_status() {
        let err = TransportError::Timeout { duration: 30 };
        assert_eq!(err.error_type(), "request_timeout");
        assert_eq!(err.status(), None);
    }
}
