//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create (auth)
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update (auth)
/// DELETE /{id}                      -> delete (auth)
/// GET    /{id}/listings             -> listings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route(
            "/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/{id}/listings", get(categories::listings))
}
