//! Error taxonomy for GitHub API access
//!
//! Every operation of this crate fails with a [`ClientError`]. The variants
//! map one to one onto the failure classes callers need to tell apart:
//! a request that never got an answer, an answer the service rejected,
//! an answer we could not decode, a request that was superseded, and a
//! workflow definition that could not be parsed during classification.

use thiserror::Error;

/// Result alias used throughout the client
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced by the transport, the typed operations and the classifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Network failure or timeout before a response was received
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-2xx response; `message` is the service-provided `message` field
    #[error("{message}")]
    Remote {
        /// HTTP status code of the rejected request
        status: u16,
        /// Message from the `{"message": ...}` error envelope
        message: String,
    },

    /// Response body (or embedded Base64 content) was malformed
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request was abandoned because a newer one superseded it
    #[error("request cancelled")]
    Cancelled,

    /// A workflow definition file could not be parsed
    #[error("workflow file '{path}' could not be parsed: {message}")]
    Classification {
        /// Path of the definition file inside the repository
        path: String,
        /// Parser diagnostic
        message: String,
    },
}

impl ClientError {
    /// Whether this error only signals cancellation and must not be surfaced
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    /// Build a remote error from a status code and message
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        ClientError::Remote {
            status,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<base64::DecodeError> for ClientError {
    fn from(err: base64::DecodeError) -> Self {
        ClientError::Decode(format!("invalid base64 content: {}", err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_service_message() {
        let err = ClientError::remote(404, "Not Found");
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn test_only_cancelled_is_cancelled() {
        assert!(ClientError::Cancelled.is_cancelled());
        assert!(!ClientError::Transport("timeout".to_string()).is_cancelled());
        assert!(!ClientError::remote(500, "boom").is_cancelled());
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: ClientError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
