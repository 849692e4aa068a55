//! Root-level liveness endpoint. Mounted outside `/api/v1` and needs no token.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::config::StorageBackend;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `"ok"`, or `"degraded"` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    /// `"postgres"` or `"memory"`.
    pub storage: &'static str,
    pub db_healthy: bool,
}

/// In-memory storage has nothing to probe and always reports healthy.
async fn probe_storage(state: &AppState) -> bool {
    let Some(pool) = &state.repos.pool else {
        return true;
    };
    match inkwell_db::health_check(pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health probe could not reach the database");
            false
        }
    }
}

/// GET /health
async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = probe_storage(&state).await;
    let storage = match state.config.storage {
        StorageBackend::Postgres => "postgres",
        StorageBackend::Memory => "memory",
    };

    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        storage,
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
