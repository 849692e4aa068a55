use std::sync::Arc;

use inkwell_db::Repositories;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the config is behind an `Arc` and every repository is
/// an `Arc`'d trait object.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Injected storage, PostgreSQL in production and in-memory in tests.
    pub repos: Repositories,
}
