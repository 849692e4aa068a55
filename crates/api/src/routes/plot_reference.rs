//! Route definitions for the `/plot-references` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::plot_reference;
use crate::state::AppState;

/// Routes mounted at `/plot-references`.
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
        .route("/", get(plot_reference::list).post(plot_reference::create))
        .route(
            "/{id}",
            get(plot_reference::get_by_id)
                .patch(plot_reference::update)
                .delete(plot_reference::delete),
        )
}
