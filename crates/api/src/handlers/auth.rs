//! Handlers for the `/auth` resource (register, login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_db::models::user::{CreateUser, UserDto};
use inkwell_db::store::UserStore;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::auth::jwt::{expired_session_cookie, generate_token, session_cookie};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserDto,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserDto>>)> {
    input
        .validate()
        .map_err(|errors| AppError::Core(CoreError::Validation(first_message(&errors))))?;

    let users = &state.repos.users;
    if users.find_by_username(&input.username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken.".into(),
        )));
    }
    if users.find_by_email(&input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered.".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = users
        .create(&CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("User registered.", UserDto::from(&user))),
    ))
}

/// POST /api/v1/auth/login
///
/// Returns the token in the body and sets it as an HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<([(HeaderName, String); 1], Json<DataResponse<LoginData>>)> {
    let user = state
        .repos
        .users
        .find_by_username(&input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let jwt = &state.config.jwt;
    let token = generate_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    let cookie = session_cookie(&token, jwt);
    let data = LoginData {
        token,
        expires_in: jwt.expiry_secs(),
        user: UserDto::from(&user),
    };
    Ok((
        [(SET_COOKIE, cookie)],
        Json(DataResponse::new("Logged in.", data)),
    ))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless, so logging out only clears the cookie.
pub async fn logout() -> ([(HeaderName, String); 1], Json<MessageResponse>) {
    (
        [(SET_COOKIE, expired_session_cookie())],
        Json(MessageResponse::new("Logged out.")),
    )
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserDto>>> {
    let user = state
        .repos
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(DataResponse::new("User found.", UserDto::from(&user))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The first failing rule's message, in field-name order.
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid registration details.".into())
}
