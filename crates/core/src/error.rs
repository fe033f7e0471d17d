//! Domain error taxonomy.
//!
//! Every failure that can cross a layer boundary is one of these variants,
//! each carrying a stable machine-readable code. Raw storage-engine error
//! text never reaches a [`CoreError`]; the store layer classifies first.

use crate::types::EntryId;

/// Operation code attached to unexpected store failures, so observability
/// keeps the cause-context without leaking engine internals to callers.
pub mod op_codes {
    pub const FETCH_ENTRIES: &str = "FETCH_ENTRIES_ERROR";
    pub const FETCH_ENTRY: &str = "FETCH_ENTRY_ERROR";
    pub const CREATE_ENTRY: &str = "CREATE_ENTRY_ERROR";
    pub const UPDATE_ENTRY: &str = "UPDATE_ENTRY_ERROR";
    pub const DELETE_ENTRY: &str = "DELETE_ENTRY_ERROR";
    pub const COUNT_ENTRIES: &str = "COUNT_ENTRIES_ERROR";
    pub const SEARCH_ENTRIES: &str = "SEARCH_ENTRIES_ERROR";
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced record does not exist (404, `ENTRY_NOT_FOUND`).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntryId },

    /// Malformed input, rejected before touching the store (400).
    ///
    /// `code` is the endpoint-specific validation code
    /// (e.g. `INVALID_ENTRY_DATA`); `details` carries per-field messages.
    #[error("Validation failed: {message}")]
    Validation {
        code: &'static str,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// The pagination cursor does not resolve to a traversal position
    /// (400, `INVALID_CURSOR`). Fatal rather than silently restarting:
    /// a restart would violate the no-duplicate/no-gap guarantees in a way
    /// the caller cannot detect.
    #[error("Invalid pagination cursor: {0}")]
    InvalidCursor(String),

    /// A unique constraint was violated (409, `DUPLICATE_ENTRY`).
    #[error("{0}")]
    Duplicate(String),

    /// Request rejected by the rate limiter (429, `RATE_LIMIT_EXCEEDED`).
    ///
    /// The limiter itself is external middleware; this variant exists so
    /// the taxonomy covers its envelope.
    #[error("Too many requests, please try again later")]
    RateLimited,

    /// Unexpected store failure (500), tagged with the operation code.
    #[error("{message}")]
    Internal { code: &'static str, message: String },
}

impl CoreError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "ENTRY_NOT_FOUND",
            CoreError::Validation { code, .. } => code,
            CoreError::InvalidCursor(_) => "INVALID_CURSOR",
            CoreError::Duplicate(_) => "DUPLICATE_ENTRY",
            CoreError::RateLimited => "RATE_LIMIT_EXCEEDED",
            CoreError::Internal { code, .. } => code,
        }
    }

    /// Shorthand for a validation failure without field details.
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Shorthand for an internal failure with an operation code.
    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        CoreError::Internal {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let not_found = CoreError::NotFound {
            entity: "Entry",
            id: "x".into(),
        };
        assert_eq!(not_found.code(), "ENTRY_NOT_FOUND");
        assert_eq!(
            CoreError::InvalidCursor("c".into()).code(),
            "INVALID_CURSOR"
        );
        assert_eq!(CoreError::Duplicate("dup".into()).code(), "DUPLICATE_ENTRY");
        assert_eq!(CoreError::RateLimited.code(), "RATE_LIMIT_EXCEEDED");
        assert_eq!(
            CoreError::internal(op_codes::FETCH_ENTRIES, "boom").code(),
            "FETCH_ENTRIES_ERROR"
        );
    }

    #[test]
    fn display_does_not_leak_internal_code() {
        let err = CoreError::internal(op_codes::CREATE_ENTRY, "Failed to create entry");
        assert_eq!(err.to_string(), "Failed to create entry");
    }
}
