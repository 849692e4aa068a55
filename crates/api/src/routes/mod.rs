pub mod auth;
pub mod book;
pub mod health;
pub mod plot;
pub mod plot_reference;
pub mod series;
pub mod weapon;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (public, clears cookie)
/// /auth/me                                         current user
///
/// /series                                          list, create
/// /series/{id}                                     get, update, delete
///
/// /books?seriesId=                                 list, create
/// /books/{id}                                      get, update, delete
///
/// /plots?seriesId=&bookId=                         list, create
/// /plots/{id}?seriesId=&bookId=                    get, update, delete
///
/// /plot-references?seriesId=&bookId=               list, create
/// /plot-references/{id}?seriesId=&bookId=          get, update, delete
///
/// /weapons?seriesId=&bookId=                       list, create
/// /weapons/{id}?seriesId=&bookId=                  get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/series", series::router())
        .nest("/books", book::router())
        .nest("/plots", plot::router())
        .nest("/plot-references", plot_reference::router())
        .nest("/weapons", weapon::router())
}
