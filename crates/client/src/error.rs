//! Client-side error type and classification.
//!
//! One tagged value covers every failure the fetch layer can produce:
//! transport-level problems (kind [`ErrorKind::Network`] / [`ErrorKind::Timeout`],
//! status 0) and API-level errors (the server's envelope, or a synthesized
//! message when the body is unparsable). Recovery decisions dispatch on the
//! classification predicates, never on string matching.

use serde_json::Value;

/// Broad failure class, used for exhaustive dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced an HTTP response (DNS, refused, reset).
    Network,
    /// The fixed upper bound elapsed before a response arrived.
    Timeout,
    /// The server answered; `code`/`status` carry its classification.
    Api,
}

/// A failed API call.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
    /// Stable machine code (`NETWORK_ERROR`, `TIMEOUT_ERROR`, the server's
    /// envelope code, or `HTTP_<status>` when the body was unparsable).
    pub code: String,
    /// HTTP status, `0` for transport-level failures.
    pub status: u16,
    pub details: Option<Value>,
}

impl ClientError {
    pub fn network() -> Self {
        Self {
            kind: ErrorKind::Network,
            message: "Network connection failed. Please check your internet connection.".into(),
            code: "NETWORK_ERROR".into(),
            status: 0,
            details: None,
        }
    }

    pub fn timeout() -> Self {
        Self {
            kind: ErrorKind::Timeout,
            message: "Request timed out. Please try again.".into(),
            code: "TIMEOUT_ERROR".into(),
            status: 0,
            details: None,
        }
    }

    /// An error decoded from the server's envelope.
    pub fn api(message: impl Into<String>, code: impl Into<String>, status: u16, details: Option<Value>) -> Self {
        Self {
            kind: ErrorKind::Api,
            message: message.into(),
            code: code.into(),
            status,
            details,
        }
    }

    /// Synthesized error for a non-2xx response whose body could not be
    /// decoded as the envelope.
    pub fn from_status(status: u16) -> Self {
        Self::api(http_error_message(status), format!("HTTP_{status}"), status, None)
    }

    // -- Classification predicates -----------------------------------------

    pub fn is_network_error(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    pub fn is_timeout_error(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }

    pub fn is_validation_error(&self) -> bool {
        self.status == 400 || self.status == 422
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Whether retrying the same request can plausibly succeed.
    ///
    /// Transport failures, server errors, and rate limiting are transient;
    /// validation errors, missing records, and conflicts are not.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Network | ErrorKind::Timeout => true,
            ErrorKind::Api => self.is_server_error() || self.is_rate_limited(),
        }
    }
}

/// Human-readable fallback message for a raw HTTP status.
pub fn http_error_message(status: u16) -> String {
    match status {
        400 => "Invalid request. Please check your input and try again.".into(),
        401 => "Authentication required. Please log in and try again.".into(),
        403 => "Access denied. You do not have permission to perform this action.".into(),
        404 => "The requested resource was not found.".into(),
        409 => "Conflict detected. The resource may have been modified by another user.".into(),
        422 => "Validation failed. Please check your input and try again.".into(),
        429 => "Too many requests. Please wait a moment and try again.".into(),
        500 => "Server error occurred. Please try again later.".into(),
        502 => "Service temporarily unavailable. Please try again later.".into(),
        503 => "Service maintenance in progress. Please try again later.".into(),
        other => format!("Server responded with status {other}. Please try again."),
    }
}
