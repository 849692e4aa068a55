//! Shared harness for HTTP-level integration tests.
//!
//! Every test gets a fresh router over in-memory repositories, so ids start
//! at 1 and no database is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use inkwell_api::auth::jwt::{generate_token, JwtConfig};
use inkwell_api::auth::password::hash_password;
use inkwell_api::config::{ServerConfig, StorageBackend};
use inkwell_api::router::build_app_router;
use inkwell_api::state::AppState;
use inkwell_core::types::DbId;
use inkwell_db::models::book::CreateBook;
use inkwell_db::models::series::CreateSeries;
use inkwell_db::models::user::CreateUser;
use inkwell_db::store::{BookStore, SeriesStore, UserStore};
use inkwell_db::Repositories;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "a-wizard-of-earthsea";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 60,
        },
    }
}

/// A router plus direct access to the repositories behind it.
pub struct TestApp {
    pub router: Router,
    pub repos: Repositories,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        let repos = Repositories::in_memory();
        let state = AppState {
            config: Arc::new(config.clone()),
            repos: repos.clone(),
        };
        let router = build_app_router(state, &config);
        Self {
            router,
            repos,
            config,
        }
    }

    /// Insert a user directly and return its id and a valid token.
    pub async fn user(&self, username: &str) -> (DbId, String) {
        let user = self
            .repos
            .users
            .create(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            })
            .await
            .expect("user creation should succeed");
        let token = generate_token(user.id, &self.config.jwt).expect("token should sign");
        (user.id, token)
    }

    pub async fn series(&self, user_id: DbId, name: &str) -> DbId {
        self.repos
            .series
            .create(
                user_id,
                &CreateSeries {
                    name: name.to_string(),
                    genre: None,
                },
            )
            .await
            .expect("series creation should succeed")
            .id
    }

    pub async fn book(&self, user_id: DbId, series_id: Option<DbId>) -> DbId {
        self.repos
            .books
            .create(
                user_id,
                &CreateBook {
                    name: "Untitled".to_string(),
                    genre: None,
                    series_id,
                },
            )
            .await
            .expect("book creation should succeed")
            .id
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &TestApp, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: &TestApp, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: &TestApp, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &TestApp, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
