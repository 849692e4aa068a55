//! Handlers for the `/books` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::ownership::ParentLookup;
use inkwell_core::types::DbId;
use inkwell_db::models::book::{BookDto, CreateBook, UpdateBook};
use inkwell_db::store::BookStore;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ScopeQuery;
use crate::request::UpdateEnvelope;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const FOREIGN_SERIES: &str = "A book can only be added to one of your series.";

/// POST /api/v1/books
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<DataResponse<BookDto>>)> {
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    ensure_owned_series(&state, auth.user_id, input.series_id).await?;

    let book = state.repos.books.create(auth.user_id, &input).await?;
    tracing::info!(
        user_id = auth.user_id,
        book_id = book.id,
        series_id = ?book.series_id,
        "Book created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Book created.", BookDto::from(book))),
    ))
}

/// GET /api/v1/books?seriesId=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ScopeQuery>,
) -> AppResult<Json<DataResponse<Vec<BookDto>>>> {
    let books = state
        .repos
        .books
        .list_for_user(auth.user_id, query.series_id)
        .await?;
    let dtos = books.into_iter().map(BookDto::from).collect();
    Ok(Json(DataResponse::new("Books found.", dtos)))
}

/// GET /api/v1/books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BookDto>>> {
    let book = state
        .repos
        .books
        .find_for_user(id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::forbidden_action()))?;
    Ok(Json(DataResponse::new("Book found.", BookDto::from(book))))
}

/// PATCH /api/v1/books/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateEnvelope<UpdateBook>>,
) -> AppResult<Json<DataResponse<BookDto>>> {
    let input = body.into_inner()?;
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    ensure_owned_series(&state, auth.user_id, input.series_id).await?;

    let book = state
        .repos
        .books
        .update(id, auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::forbidden_action()))?;
    tracing::info!(user_id = auth.user_id, book_id = id, "Book updated");

    Ok(Json(DataResponse::new("Book updated.", BookDto::from(book))))
}

/// DELETE /api/v1/books/{id}
///
/// Cascades to the book's plots and plot references and unlinks weapons.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repos.books.delete(id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::forbidden_action()));
    }
    tracing::info!(user_id = auth.user_id, book_id = id, "Book deleted");
    Ok(Json(MessageResponse::new("Book deleted.")))
}

/// Reject a `seriesId` the caller does not own.
async fn ensure_owned_series(
    state: &AppState,
    user_id: DbId,
    series_id: Option<DbId>,
) -> AppResult<()> {
    let Some(series_id) = series_id else {
        return Ok(());
    };
    let owned = state
        .repos
        .parents
        .find_owned_series(series_id, user_id)
        .await?;
    if owned.is_none() {
        tracing::warn!(user_id, series_id, "Book attached to foreign series rejected");
        return Err(AppError::BadRequest(FOREIGN_SERIES.into()));
    }
    Ok(())
}
