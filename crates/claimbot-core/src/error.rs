//! Unified error types for claimbot

use thiserror::Error;

/// Unified error type for all claimbot operations
#[derive(Error, Debug)]
pub enum ClaimError {
    // Network errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error: {status}")]
    RemoteService { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    // Operator input errors
    #[error("Configuration error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Run state errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClaimError {
    /// HTTP status carried by a remote service error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClaimError::RemoteService { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias using ClaimError
pub type Result<T> = std::result::Result<T, ClaimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_service_message_names_status() {
        let err = ClaimError::RemoteService {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = ClaimError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
    }
}
