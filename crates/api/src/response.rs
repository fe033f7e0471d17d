//! Shared response envelope types.
//!
//! Every response body carries a top-level `success` flag: `data` is
//! present iff it is true, `error.{message,code}` iff it is false. Use
//! [`Envelope`] for the success side instead of ad-hoc
//! `serde_json::json!` so the shape is enforced at compile time; the error
//! side is produced by `AppError`'s `IntoResponse`.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Payload for `DELETE /entries/{id}` and the health endpoint.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Payload for `GET /entries/count`.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
