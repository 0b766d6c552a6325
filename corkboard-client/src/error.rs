//! Client-side error taxonomy.
//!
//! Every facade and screen operation resolves to a [`ClientError`]
//! carrying one of a small set of kinds. Gateway responses map by
//! status code; transport failures map to [`ErrorKind::Network`].

use std::fmt;

use reqwest::StatusCode;

/// Category of a failed client operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The gateway rejected the request payload (400).
    Validation,
    /// No valid session (401).
    Auth,
    /// The session's role does not permit the operation (403).
    Forbidden,
    /// The target resource does not exist (404).
    NotFound,
    /// The operation collides with existing state (409).
    Conflict,
    /// The gateway failed or returned an unexpected response.
    Service,
    /// The request never completed at the transport level.
    Network,
}

impl ErrorKind {
    /// Maps a non-success HTTP status to its error kind.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ErrorKind::Validation,
            StatusCode::UNAUTHORIZED => ErrorKind::Auth,
            StatusCode::FORBIDDEN => ErrorKind::Forbidden,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::CONFLICT => ErrorKind::Conflict,
            _ => ErrorKind::Service,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Auth => "auth",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Service => "service",
            ErrorKind::Network => "network",
        };
        write!(f, "{}", label)
    }
}

/// Error returned by every facade and screen operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({kind})")]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for local role-gate rejections.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // A body that fails to parse is a broken gateway response, not
        // a transport failure.
        let kind = if err.is_decode() {
            ErrorKind::Service
        } else {
            ErrorKind::Network
        };
        Self::new(kind, err.to_string())
    }
}
