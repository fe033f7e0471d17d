mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn health_returns_enveloped_message() {
    let app = common::build_test_app();
    let response = common::get(app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["message"], "Cinelog API is running");
}
