//! Handlers for the `/weapons` resource.
//!
//! A weapon created with `?bookId=` is linked to that single book; weapons
//! are then reachable through any of their linked books or their series.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::ownership::OwnershipResolver;
use inkwell_core::scope::ScopeParams;
use inkwell_core::types::DbId;
use inkwell_db::models::weapon::{CreateWeapon, UpdateWeapon, WeaponDto};
use inkwell_db::store::{DynParentLookup, DynWeaponRepository};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ScopeQuery;
use crate::request::UpdateEnvelope;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn resolver(state: &AppState) -> OwnershipResolver<'_, DynParentLookup, DynWeaponRepository> {
    OwnershipResolver::new(&*state.repos.parents, &*state.repos.weapons)
}

/// POST /api/v1/weapons
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(scope): Query<ScopeQuery>,
    Json(input): Json<CreateWeapon>,
) -> AppResult<(StatusCode, Json<DataResponse<WeaponDto>>)> {
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let weapon = resolver(&state)
        .create(auth.user_id, ScopeParams::from(scope), &input)
        .await?;
    tracing::info!(
        user_id = auth.user_id,
        weapon_id = weapon.id,
        series_id = ?weapon.series_id,
        book_ids = ?weapon.book_ids,
        "Weapon created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Weapon created.", WeaponDto::from(weapon))),
    ))
}

/// GET /api/v1/weapons
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<DataResponse<Vec<WeaponDto>>>> {
    let weapons = resolver(&state)
        .list(auth.user_id, ScopeParams::from(scope))
        .await?;
    let dtos = weapons.into_iter().map(WeaponDto::from).collect();
    Ok(Json(DataResponse::new("Weapons found.", dtos)))
}

/// GET /api/v1/weapons/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<DataResponse<WeaponDto>>> {
    let weapon = resolver(&state)
        .find(id, auth.user_id, ScopeParams::from(scope))
        .await?;
    Ok(Json(DataResponse::new("Weapon found.", WeaponDto::from(weapon))))
}

/// PATCH /api/v1/weapons/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
    Json(body): Json<UpdateEnvelope<UpdateWeapon>>,
) -> AppResult<Json<DataResponse<WeaponDto>>> {
    let input = body.into_inner()?;
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let weapon = resolver(&state)
        .update(id, auth.user_id, ScopeParams::from(scope), &input)
        .await?;
    tracing::info!(user_id = auth.user_id, weapon_id = id, "Weapon updated");

    Ok(Json(DataResponse::new("Weapon updated.", WeaponDto::from(weapon))))
}

/// DELETE /api/v1/weapons/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<Json<MessageResponse>> {
    resolver(&state)
        .delete(id, auth.user_id, ScopeParams::from(scope))
        .await?;
    tracing::info!(user_id = auth.user_id, weapon_id = id, "Weapon deleted");
    Ok(Json(MessageResponse::new("Weapon deleted.")))
}
