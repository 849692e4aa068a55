//! Handlers for the `/plot-references` resource.
//!
//! Every route takes `?seriesId=&bookId=`; at least one must be present and
//! name a parent the caller owns.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::ownership::OwnershipResolver;
use inkwell_core::scope::ScopeParams;
use inkwell_core::types::DbId;
use inkwell_db::models::plot_reference::{
    CreatePlotReference, PlotReferenceDto, UpdatePlotReference,
};
use inkwell_db::store::{DynParentLookup, DynPlotReferenceRepository};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ScopeQuery;
use crate::request::UpdateEnvelope;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn resolver(
    state: &AppState,
) -> OwnershipResolver<'_, DynParentLookup, DynPlotReferenceRepository> {
    OwnershipResolver::new(&*state.repos.parents, &*state.repos.plot_references)
}

/// POST /api/v1/plot-references
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(scope): Query<ScopeQuery>,
    Json(input): Json<CreatePlotReference>,
) -> AppResult<(StatusCode, Json<DataResponse<PlotReferenceDto>>)> {
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let reference = resolver(&state)
        .create(auth.user_id, ScopeParams::from(scope), &input)
        .await?;
    tracing::info!(
        user_id = auth.user_id,
        plot_reference_id = reference.id,
        series_id = ?reference.series_id,
        book_id = ?reference.book_id,
        "Plot reference created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(
            "Plot reference created.",
            PlotReferenceDto::from(reference),
        )),
    ))
}

/// GET /api/v1/plot-references
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<DataResponse<Vec<PlotReferenceDto>>>> {
    let references = resolver(&state)
        .list(auth.user_id, ScopeParams::from(scope))
        .await?;
    let dtos = references.into_iter().map(PlotReferenceDto::from).collect();
    Ok(Json(DataResponse::new("Plot references found.", dtos)))
}

/// GET /api/v1/plot-references/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<DataResponse<PlotReferenceDto>>> {
    let reference = resolver(&state)
        .find(id, auth.user_id, ScopeParams::from(scope))
        .await?;
    Ok(Json(DataResponse::new(
        "Plot reference found.",
        PlotReferenceDto::from(reference),
    )))
}

/// PATCH /api/v1/plot-references/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
    Json(body): Json<UpdateEnvelope<UpdatePlotReference>>,
) -> AppResult<Json<DataResponse<PlotReferenceDto>>> {
    let input = body.into_inner()?;
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let reference = resolver(&state)
        .update(id, auth.user_id, ScopeParams::from(scope), &input)
        .await?;
    tracing::info!(
        user_id = auth.user_id,
        plot_reference_id = id,
        "Plot reference updated"
    );

    Ok(Json(DataResponse::new(
        "Plot reference updated.",
        PlotReferenceDto::from(reference),
    )))
}

/// DELETE /api/v1/plot-references/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<MessageResponse>> {
    resolver(&state)
        .delete(id, auth.user_id, ScopeParams::from(scope))
        .await?;
    tracing::info!(
        user_id = auth.user_id,
        plot_reference_id = id,
        "Plot reference deleted"
    );
    Ok(Json(MessageResponse::new("Plot reference deleted.")))
}
