//! HTTP-level integration tests for `/auth` and token extraction.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_auth, post_json, TestApp, TEST_PASSWORD};
use serde_json::json;
use tower::ServiceExt;

fn registration(username: &str, email: &str, password: &str) -> serde_json::Value {
    json!({ "username": username, "email": email, "password": password })
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_public_user() {
    let app = TestApp::new();

    let body = registration("ursula", "ursula@example.com", "anarres-1974");
    let response = post_json(&app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({
            "message": "User registered.",
            "data": { "id": 1, "username": "ursula", "email": "ursula@example.com" },
        })
    );
}

#[tokio::test]
async fn register_duplicate_username_conflicts() {
    let app = TestApp::new();
    app.user("ursula").await;

    let body = registration("ursula", "other@example.com", "anarres-1974");
    let response = post_json(&app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["message"], "Username is already taken.");
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.user("ursula").await;

    let body = registration("someone", "ursula@example.com", "anarres-1974");
    let response = post_json(&app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["message"],
        "Email is already registered."
    );
}

#[tokio::test]
async fn register_short_password_is_validation_error() {
    let app = TestApp::new();

    let body = registration("ursula", "ursula@example.com", "short");
    let response = post_json(&app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Password must be at least 8 characters.");
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_token_and_sets_cookie() {
    let app = TestApp::new();
    app.user("ursula").await;

    let body = json!({ "username": "ursula", "password": TEST_PASSWORD });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=3600"));

    let json = body_json(response).await;
    assert_eq!(json["message"], "Logged in.");
    assert_eq!(json["data"]["expiresIn"], 3600);
    assert_eq!(json["data"]["user"]["username"], "ursula");
    let token = json["data"]["token"].as_str().unwrap();
    assert!(cookie.starts_with(&format!("token={token};")));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.user("ursula").await;

    let body = json!({ "username": "ursula", "password": "not-the-password" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let app = TestApp::new();

    let body = json!({ "username": "nobody", "password": TEST_PASSWORD });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_expires_cookie() {
    let app = TestApp::new();

    let response = post_json(&app, "/api/v1/auth/logout", json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await, json!({ "message": "Logged out." }));
}

// ---------------------------------------------------------------------------
// Me / token extraction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_accepts_bearer_token() {
    let app = TestApp::new();
    let (id, token) = app.user("ursula").await;

    let response = get_auth(&app, "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User found.");
    assert_eq!(json["data"]["id"], id);
}

#[tokio::test]
async fn me_accepts_session_cookie() {
    let app = TestApp::new();
    let (_, token) = app.user("ursula").await;

    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header(COOKIE, format!("theme=dark; token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["username"], "ursula");
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = get(&app, "/api/v1/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let response = get_auth(&app, "/api/v1/auth/me", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}
