//! Route definitions for the `/series` resource.
//!
//! Series routes take no scope; ownership is by the authenticated user.

use axum::routing::get;
use axum::Router;

use crate::handlers::series;
use crate::state::AppState;

/// Routes mounted at `/series`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(series::list).post(series::create))
        .route(
            "/{id}",
            get(series::get_by_id)
                .patch(series::update)
                .delete(series::delete),
        )
}
