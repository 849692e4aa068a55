//! Tests for the root-level `/health` endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, TestApp};

#[tokio::test]
async fn health_is_ok_with_memory_storage() {
    let app = TestApp::new();

    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["storage"], "memory");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn health_is_not_under_api_prefix() {
    let app = TestApp::new();

    let response = get(&app, "/api/v1/health").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::new();

    let response = get(&app, "/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}
