//! Route definitions for the `/swaps` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::swaps;
use crate::state::AppState;

/// Routes mounted at `/swaps`.
///
/// ```text
/// POST   /                          -> create
/// GET    /{id}                      -> get_details
/// POST   /{id}/confirm              -> confirm
/// POST   /{id}/complete             -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(swaps::create))
        .route("/{id}", get(swaps::get_details))
        .route("/{id}/confirm", post(swaps::confirm))
        .route("/{id}/complete", post(swaps::complete))
}
