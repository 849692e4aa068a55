//! Handlers for the `/plots` resource.
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
use inkwell_db::models::plot::{CreatePlot, PlotDto, UpdatePlot};
use inkwell_db::store::{DynParentLookup, DynPlotRepository};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ScopeQuery;
use crate::request::UpdateEnvelope;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn resolver(state: &AppState) -> OwnershipResolver<'_, DynParentLookup, DynPlotRepository> {
    OwnershipResolver::new(&*state.repos.parents, &*state.repos.plots)
}

/// POST /api/v1/plots
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(scope): Query<ScopeQuery>,
    Json(input): Json<CreatePlot>,
) -> AppResult<(StatusCode, Json<DataResponse<PlotDto>>)> {
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let plot = resolver(&state)
        .create(auth.user_id, ScopeParams::from(scope), &input)
        .await?;
    tracing::info!(
        user_id = auth.user_id,
        plot_id = plot.id,
        series_id = ?plot.series_id,
        book_id = ?plot.book_id,
        "Plot created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Plot created.", PlotDto::from(plot))),
    ))
}

/// GET /api/v1/plots
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<DataResponse<Vec<PlotDto>>>> {
    let plots = resolver(&state)
        .list(auth.user_id, ScopeParams::from(scope))
        .await?;
    let dtos = plots.into_iter().map(PlotDto::from).collect();
    Ok(Json(DataResponse::new("Plots found.", dtos)))
}

/// GET /api/v1/plots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<DataResponse<PlotDto>>> {
    let plot = resolver(&state)
        .find(id, auth.user_id, ScopeParams::from(scope))
        .await?;
    Ok(Json(DataResponse::new("Plot found.", PlotDto::from(plot))))
}

/// PATCH /api/v1/plots/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
    Json(body): Json<UpdateEnvelope<UpdatePlot>>,
) -> AppResult<Json<DataResponse<PlotDto>>> {
    let input = body.into_inner()?;
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let plot = resolver(&state)
        .update(id, auth.user_id, ScopeParams::from(scope), &input)
        .await?;
    tracing::info!(user_id = auth.user_id, plot_id = id, "Plot updated");

    Ok(Json(DataResponse::new("Plot updated.", PlotDto::from(plot))))
}

/// DELETE /api/v1/plots/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<MessageResponse>> {
    resolver(&state)
        .delete(id, auth.user_id, ScopeParams::from(scope))
        .await?;
    tracing::info!(user_id = auth.user_id, plot_id = id, "Plot deleted");
    Ok(Json(MessageResponse::new("Plot deleted.")))
}
