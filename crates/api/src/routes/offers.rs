//! Route definitions for the `/offers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::offers;
use crate::state::AppState;

/// Routes mounted at `/offers`.
///
/// ```text
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update_status
/// POST   /{id}/withdraw             -> withdraw
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(offers::get_by_id).put(offers::update_status))
        .route("/{id}/withdraw", post(offers::withdraw))
}
