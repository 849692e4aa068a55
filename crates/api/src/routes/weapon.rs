//! Route definitions for the `/weapons` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::weapon;
use crate::state::AppState;

/// Routes mounted at `/weapons`.
/// Every route requires `?seriesId=` and/or `?bookId=`.
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
        .route("/", get(weapon::list).post(weapon::create))
        .route(
            "/{id}",
            get(weapon::get_by_id)
                .patch(weapon::update)
                .delete(weapon::delete),
        )
}
