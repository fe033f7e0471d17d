//! Route definition for the health probe.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Mounts `GET /health` under the API base path.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::health))
}
