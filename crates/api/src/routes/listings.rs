//! Route definitions for the `/listings` resource, including the offers,
//! swaps and likes nested under a listing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{likes, listings, offers, swaps};
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET    /                          -> browse
/// POST   /                          -> create (auth)
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update (owner)
/// DELETE /{id}                      -> delete (owner)
/// POST   /{id}/offers               -> offers::create
/// GET    /{id}/offers               -> offers::for_listing (owner)
/// GET    /{id}/swaps                -> swaps::for_listing (owner)
/// POST   /{id}/like                 -> likes::like
/// DELETE /{id}/like                 -> likes::unlike
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(listings::browse).post(listings::create))
        .route(
            "/{id}",
            get(listings::get_by_id)
                .put(listings::update)
                .delete(listings::delete),
        )
        .route(
            "/{id}/offers",
            post(offers::create).get(offers::for_listing),
        )
        .route("/{id}/swaps", get(swaps::for_listing))
        .route("/{id}/like", post(likes::like).delete(likes::unlike))
}
