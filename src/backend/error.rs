//! Backend error types

use thiserror::Error;

/// Longest slice of an error body kept in the message
const BODY_SNIPPET_CHARS: usize = 200;

/// Backend error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
    /// HTTP status for [`BackendErrorKind::Status`]
    pub status: Option<u16>,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Timeout, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Decode, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Unknown, message)
    }

    /// Non-2xx response. Keeps the head of the body for diagnosis.
    pub fn status(status: u16, body: &str) -> Self {
        let snippet: String = body.chars().take(BODY_SNIPPET_CHARS).collect();
        Self {
            kind: BackendErrorKind::Status,
            message: format!("Backend error {status}: {snippet}"),
            status: Some(status),
        }
    }

    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("Request timed out: {err}"))
        } else if err.is_decode() || err.is_body() {
            Self::decode(format!("Failed to read response: {err}"))
        } else if err.is_connect() || err.is_request() {
            Self::network(format!("Request failed: {err}"))
        } else {
            Self::unknown(err.to_string())
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Connection refused, DNS, reset
    Network,
    /// Client-side timeout elapsed
    Timeout,
    /// Service answered with a non-success status
    Status,
    /// Body could not be read
    Decode,
    Unknown,
}
