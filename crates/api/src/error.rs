//! Application-level error type for HTTP handlers.
//!
//! Wraps [`CoreError`] for domain errors and adds routing-level variants.
//! Implements [`IntoResponse`] to produce the uniform
//! `{ "success": false, "error": { "message", "code", "details?" } }`
//! envelope with the status derived from the taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use cinelog_core::error::CoreError;
use cinelog_core::validation::{details_json, FieldError};

/// Validation codes owned by the transport layer.
pub mod codes {
    pub const INVALID_QUERY_PARAMS: &str = "INVALID_QUERY_PARAMS";
    pub const INVALID_ENTRY_DATA: &str = "INVALID_ENTRY_DATA";
    pub const INVALID_ENTRY_ID: &str = "INVALID_ENTRY_ID";
    pub const INVALID_UPDATE_DATA: &str = "INVALID_UPDATE_DATA";
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cinelog-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No route matched the request path.
    #[error("Route {0} not found")]
    RouteNotFound(String),

    /// The path matched but the method is not supported.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Validation failure with a transport code and per-field details.
    pub fn validation(code: &'static str, message: &str, errors: &[FieldError]) -> Self {
        AppError::Core(CoreError::Validation {
            code,
            message: message.to_string(),
            details: Some(details_json(errors)),
        })
    }

    /// Validation failure without field details (e.g. undecodable body).
    pub fn validation_bare(code: &'static str, message: &str) -> Self {
        AppError::Core(CoreError::validation(code, message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "ENTRY_NOT_FOUND",
                    format!("{entity} not found: {id}"),
                    None,
                ),
                CoreError::Validation {
                    code,
                    message,
                    details,
                } => (StatusCode::BAD_REQUEST, code, message, details),
                CoreError::InvalidCursor(cursor) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_CURSOR",
                    format!("Cursor does not resolve to a valid position: {cursor}"),
                    None,
                ),
                CoreError::Duplicate(message) => {
                    (StatusCode::CONFLICT, "DUPLICATE_ENTRY", message, None)
                }
                CoreError::RateLimited => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMIT_EXCEEDED",
                    "Too many requests, please try again later".to_string(),
                    None,
                ),
                CoreError::Internal { code, message } => {
                    // The message here is already the sanitized operation
                    // message; the raw cause was logged at the store seam.
                    tracing::error!(code, "Internal error reached the transport layer");
                    (StatusCode::INTERNAL_SERVER_ERROR, code, message, None)
                }
            },

            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Route {path} not found"),
                None,
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
                None,
            ),
        };

        let mut error = json!({
            "message": message,
            "code": code,
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        let body = json!({
            "success": false,
            "error": error,
        });

        (status, axum::Json(body)).into_response()
    }
}
