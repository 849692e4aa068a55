//! Route definitions for the `/plots` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::plot;
use crate::state::AppState;

/// Routes mounted at `/plots`.
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
        .route("/", get(plot::list).post(plot::create))
        .route(
            "/{id}",
            get(plot::get_by_id)
                .patch(plot::update)
                .delete(plot::delete),
        )
}
