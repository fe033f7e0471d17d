//! Route definitions for entries.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::entries;
use crate::state::AppState;

/// Routes mounted at `/entries`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /search   -> search
/// GET    /count    -> count
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::list).post(entries::create))
        .route("/search", get(entries::search))
        .route("/count", get(entries::count))
        .route("/{id}", put(entries::update).delete(entries::delete))
}
