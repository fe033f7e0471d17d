//! Shared helpers for router-level integration tests.
//!
//! Requests are sent straight to the router with `tower::ServiceExt`, no
//! TCP listener involved. The app runs over the in-memory store so the
//! full transport/service/store path is exercised without a database
//! service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cinelog_api::config::ServerConfig;
use cinelog_api::router::build_app_router;
use cinelog_api::state::AppState;
use cinelog_db::{EntryService, EntryStore, MemoryEntryStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        api_base_path: "/api".to_string(),
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Mirrors the router construction in `main.rs` so tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app() -> Router {
    let config = test_config();
    let store: Arc<dyn EntryStore> = Arc::new(MemoryEntryStore::new());
    let state = AppState {
        service: EntryService::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid create payload with a unique title.
pub fn entry_payload(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "type": "MOVIE",
        "director": "Test Director",
        "budget": "$1,000,000",
        "location": "Test City",
        "duration": "120 min",
        "year": "2020",
    })
}
