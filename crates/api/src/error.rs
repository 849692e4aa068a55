use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inkwell_core::error::{CoreError, FORBIDDEN_ACTION_MESSAGE};
use inkwell_core::ownership::OwnershipError;
use serde::Serialize;

/// Error returned by every handler.
///
/// Renders as `{ "message": ..., "code": ... }`. Internal failures are
/// logged in full and answered with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Rejection or storage failure from the ownership resolver.
    #[error(transparent)]
    Ownership(#[from] OwnershipError<sqlx::Error>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    code: &'static str,
}

type Parts = (StatusCode, &'static str, String);

impl AppError {
    fn parts(&self) -> Parts {
        match self {
            AppError::Core(err) => core_parts(err),
            AppError::Ownership(OwnershipError::Store(err)) => database_parts(err),
            AppError::Ownership(err @ OwnershipError::MissingScope) => {
                (StatusCode::BAD_REQUEST, "MISSING_SCOPE", err.to_string())
            }
            AppError::Ownership(err @ OwnershipError::NoOwnedParent { .. }) => {
                (StatusCode::BAD_REQUEST, "NO_OWNED_PARENT", err.to_string())
            }
            AppError::Ownership(err @ OwnershipError::ForbiddenAction) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN_ACTION", err.to_string())
            }
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(ErrorBody { message, code })).into_response()
    }
}

fn core_parts(err: &CoreError) -> Parts {
    match err {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN_ACTION", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

fn internal() -> Parts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a sqlx failure onto the error envelope.
///
/// - `RowNotFound`: 404.
/// - `23505` on a `uq_*` constraint: 409.
/// - `23503` (a parent vanished between the ownership check and the write):
///   403, same as any other unreachable parent.
/// - Anything else: sanitized 500.
fn database_parts(err: &sqlx::Error) -> Parts {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            )
        }
        sqlx::Error::Database(db_err) => db_err,
        other => {
            tracing::error!(error = %other, "Database error");
            return internal();
        }
    };

    match (db_err.code().as_deref(), db_err.constraint()) {
        (Some("23505"), Some(constraint)) if constraint.starts_with("uq_") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        (Some("23503"), constraint) => {
            tracing::warn!(constraint = ?constraint, "Parent removed during write");
            (
                StatusCode::FORBIDDEN,
                "FORBIDDEN_ACTION",
                FORBIDDEN_ACTION_MESSAGE.to_string(),
            )
        }
        _ => {
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
    }
}
