//! Wire-level tests for `ApiClient`.
//!
//! Each test spins up a minimal axum server on an ephemeral port that
//! answers with scripted envelopes, then asserts on the typed result or
//! the error classification the client produces.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use cinelog_client::ApiClient;
use cinelog_core::entry::{Entry, EntryType, NewEntry};

fn sample_entry() -> Entry {
    Entry {
        id: "0190cafe-babe-7000-8000-1234567890ab".into(),
        title: "Heat".into(),
        entry_type: EntryType::Movie,
        director: "Michael Mann".into(),
        budget: "$60,000,000".into(),
        location: "Los Angeles".into(),
        duration: "170 min".into(),
        year: "1995".into(),
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

/// Serve `router` under `/api` on an ephemeral port; returns the base URL.
async fn spawn(router: Router) -> String {
    let app = Router::new().nest("/api", router);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn list_entries_unwraps_the_page_envelope() {
    let entry = sample_entry();
    let body = serde_json::json!({
        "success": true,
        "data": {
            "data": [serde_json::to_value(&entry).unwrap()],
            "hasMore": true,
            "nextCursor": entry.id,
        },
    });
    let router = Router::new().route("/entries", get(move || async move { Json(body) }));

    let client = ApiClient::new(spawn(router).await);
    let page = client.list_entries(None, Some(20)).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].title, "Heat");
    assert!(page.has_more);
    assert_eq!(page.next_cursor.as_deref(), Some(page.data[0].id.as_str()));
}

#[tokio::test]
async fn create_entry_returns_the_created_record() {
    let entry = sample_entry();
    let body = serde_json::json!({"success": true, "data": serde_json::to_value(&entry).unwrap()});
    let router = Router::new().route(
        "/entries",
        post(move || async move { (StatusCode::CREATED, Json(body)) }),
    );

    let client = ApiClient::new(spawn(router).await);
    let input = NewEntry {
        title: "Heat".into(),
        entry_type: EntryType::Movie,
        director: "Michael Mann".into(),
        budget: "$60,000,000".into(),
        location: "Los Angeles".into(),
        duration: "170 min".into(),
        year: "1995".into(),
    };
    let created = client.create_entry(&input).await.unwrap();
    assert_eq!(created.title, "Heat");
}

#[tokio::test]
async fn server_error_envelope_is_decoded_into_a_typed_error() {
    let body = serde_json::json!({
        "success": false,
        "error": {"message": "Entry with this title already exists", "code": "DUPLICATE_ENTRY"},
    });
    let router = Router::new().route(
        "/entries",
        post(move || async move { (StatusCode::CONFLICT, Json(body)) }),
    );

    let client = ApiClient::new(spawn(router).await);
    let input = NewEntry {
        title: "Heat".into(),
        entry_type: EntryType::Movie,
        director: "d".into(),
        budget: "$1".into(),
        location: "l".into(),
        duration: "90 min".into(),
        year: "1995".into(),
    };
    let err = client.create_entry(&input).await.unwrap_err();

    assert_eq!(err.code, "DUPLICATE_ENTRY");
    assert_eq!(err.status, 409);
    assert_eq!(err.message, "Entry with this title already exists");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unparsable_error_body_gets_a_status_keyed_message() {
    let router = Router::new().route(
        "/entries",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );

    let client = ApiClient::new(spawn(router).await);
    let err = client.list_entries(None, None).await.unwrap_err();

    assert_eq!(err.code, "HTTP_500");
    assert_eq!(err.status, 500);
    assert!(err.message.contains("Server error"));
    assert!(err.is_server_error());
}

#[tokio::test]
async fn success_false_on_2xx_still_becomes_an_error() {
    let body = serde_json::json!({
        "success": false,
        "error": {"message": "odd but possible", "code": "FETCH_ENTRIES_ERROR"},
    });
    let router = Router::new().route("/entries", get(move || async move { Json(body) }));

    let client = ApiClient::new(spawn(router).await);
    let err = client.list_entries(None, None).await.unwrap_err();
    assert_eq!(err.code, "FETCH_ENTRIES_ERROR");
}

#[tokio::test]
async fn connection_refused_classifies_as_network_error() {
    // Grab a free port, then close the listener so nothing answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}/api"));
    let err = client.list_entries(None, None).await.unwrap_err();

    assert!(err.is_network_error());
    assert_eq!(err.status, 0);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn slow_response_classifies_as_timeout() {
    let router = Router::new().route(
        "/entries",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(serde_json::json!({"success": true, "data": {"data": [], "hasMore": false}}))
        }),
    );

    let client = ApiClient::new(spawn(router).await).with_timeout(Duration::from_millis(50));
    let err = client.list_entries(None, None).await.unwrap_err();

    assert!(err.is_timeout_error());
    assert_eq!(err.status, 0);
}

#[tokio::test]
async fn health_unwraps_message() {
    let router = Router::new().route(
        "/health",
        get(|| async {
            Json(serde_json::json!({"success": true, "data": {"message": "Cinelog API is running"}}))
        }),
    );

    let client = ApiClient::new(spawn(router).await);
    assert_eq!(client.health().await.unwrap(), "Cinelog API is running");
}

#[tokio::test]
async fn delete_unwraps_message_payload() {
    let router = Router::new().route(
        "/entries/{id}",
        axum::routing::delete(|| async {
            Json(serde_json::json!({"success": true, "data": {"message": "Entry deleted successfully"}}))
        }),
    );

    let client = ApiClient::new(spawn(router).await);
    client.delete_entry("some-id").await.unwrap();
}
