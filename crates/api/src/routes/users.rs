//! Route definitions for the `/users` resource.
//!
//! The `/users/me/...` subtree holds everything scoped to the caller.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{likes, listings, offers, swaps, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me                          -> me
/// PUT    /me                          -> update_profile
/// PUT    /me/onboarding               -> complete_onboarding
/// GET    /me/listings                 -> listings::mine
/// GET    /me/offers/sent              -> offers::sent
/// GET    /me/offers/received          -> offers::received
/// GET    /me/swaps                    -> swaps::mine
/// GET    /me/likes                    -> likes::my_likes
/// GET    /me/recent-views             -> likes::recent_views
/// DELETE /me/recent-views/{product_id} -> likes::forget_view
/// GET    /{id}                        -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me).put(users::update_profile))
        .route("/me/onboarding", put(users::complete_onboarding))
        .route("/me/listings", get(listings::mine))
        .route("/me/offers/sent", get(offers::sent))
        .route("/me/offers/received", get(offers::received))
        .route("/me/swaps", get(swaps::mine))
        .route("/me/likes", get(likes::my_likes))
        .route("/me/recent-views", get(likes::recent_views))
        .route("/me/recent-views/{product_id}", delete(likes::forget_view))
        .route("/{id}", get(users::get_by_id))
}
