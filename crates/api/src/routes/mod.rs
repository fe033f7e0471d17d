pub mod entries;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the route tree mounted under the configured base path.
///
/// ```text
/// /health              liveness
/// /entries             list (GET), create (POST)
/// /entries/search      paginated title search (GET)
/// /entries/count       total count (GET)
/// /entries/{id}        update (PUT), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/entries", entries::router())
}
