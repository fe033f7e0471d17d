pub mod entries;
pub mod health;

use axum::http::Uri;

use crate::error::AppError;

/// Fallback for unmatched paths; keeps the error envelope shape on 404s.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// Fallback for matched paths with unsupported methods (405).
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
