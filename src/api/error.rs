//! Error types for calls against the articles API.
//!
//! Every failure is classified into one of three kinds so callers can decide
//! whether the session is still usable.

use thiserror::Error;

/// Errors that can occur while talking to the articles API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced an HTTP response (DNS, refused, timeout).
    #[error("Connection to '{url}' failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server rejected the session token (401).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-success status.
    #[error("Request rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// Success status, but the body did not match the expected shape.
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL plus path could not be turned into a request.
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network-level failure or an unreadable response.
    Transport,
    /// The server refused the request for a reason other than auth.
    Validation,
    /// The session is invalid or expired.
    AuthRejected,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Connection { .. } => ErrorKind::Transport,
            ApiError::Decode { .. } => ErrorKind::Transport,
            ApiError::InvalidUrl(_) => ErrorKind::Transport,
            ApiError::Client(_) => ErrorKind::Transport,
            ApiError::Unauthorized { .. } => ErrorKind::AuthRejected,
            ApiError::Rejected { .. } => ErrorKind::Validation,
        }
    }

    pub fn is_auth_rejection(&self) -> bool {
        self.kind() == ErrorKind::AuthRejected
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build the error for a non-success status and its (possibly empty) server message.
    pub fn from_status(status: u16, message: String) -> Self {
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Rejected { status, message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_auth_rejection() {
        let err = ApiError::from_status(401, "Token expired".to_string());
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.kind(), ErrorKind::AuthRejected);
        assert_eq!(err.status(), Some(401));
        assert!(err.is_auth_rejection());
    }

    #[test]
    fn test_other_4xx_is_validation() {
        let err = ApiError::from_status(422, "title is required".to_string());
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_auth_rejection());
        assert_eq!(err.to_string(), "Request rejected: 422 - title is required");
    }

    #[test]
    fn test_403_is_not_auth_rejection() {
        let err = ApiError::from_status(403, String::new());
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_decode_is_transport() {
        let source = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = ApiError::Decode {
            url: "http://x/api".to_string(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), None);
    }
}
