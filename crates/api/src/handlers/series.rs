//! Handlers for the `/series` resource.
//!
//! Series are owned directly by a user. A series that does not exist and one
//! owned by someone else are indistinguishable: both yield 403.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_db::models::series::{CreateSeries, SeriesDto, UpdateSeries};
use inkwell_db::store::SeriesStore;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::request::UpdateEnvelope;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/series
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateSeries>,
) -> AppResult<(StatusCode, Json<DataResponse<SeriesDto>>)> {
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let series = state.repos.series.create(auth.user_id, &input).await?;
    tracing::info!(user_id = auth.user_id, series_id = series.id, "Series created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Series created.", SeriesDto::from(series))),
    ))
}

/// GET /api/v1/series
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SeriesDto>>>> {
    let series = state.repos.series.list_for_user(auth.user_id).await?;
    let dtos = series.into_iter().map(SeriesDto::from).collect();
    Ok(Json(DataResponse::new("Series found.", dtos)))
}

/// GET /api/v1/series/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SeriesDto>>> {
    let series = state
        .repos
        .series
        .find_for_user(id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::forbidden_action()))?;
    Ok(Json(DataResponse::new("Series found.", SeriesDto::from(series))))
}

/// PATCH /api/v1/series/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateEnvelope<UpdateSeries>>,
) -> AppResult<Json<DataResponse<SeriesDto>>> {
    let input = body.into_inner()?;
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let series = state
        .repos
        .series
        .update(id, auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::forbidden_action()))?;
    tracing::info!(user_id = auth.user_id, series_id = id, "Series updated");

    Ok(Json(DataResponse::new("Series updated.", SeriesDto::from(series))))
}

/// DELETE /api/v1/series/{id}
///
/// Cascades to the series' plots and plot references.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !state.repos.series.delete(id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::forbidden_action()));
    }
    tracing::info!(user_id = auth.user_id, series_id = id, "Series deleted");
    Ok(Json(MessageResponse::new("Series deleted.")))
}
