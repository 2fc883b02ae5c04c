//! Handlers for the `/swaps` resource.
//!
//! All endpoints require authentication and are limited to the two
//! parties of a swap, or to the listing owner for listing-scoped reads.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use swapshop_core::types::DbId;
use swapshop_db::models::swap::CreateSwap;
use swapshop_db::repositories::SwapRepo;

use crate::engine::swaps;
use crate::error::AppResult;
use crate::handlers::listings::owned_listing;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/swaps
///
/// Idempotent: returns the existing swap when the offer already has one.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSwap>,
) -> AppResult<impl IntoResponse> {
    let swap = swaps::create_swap(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(swap))))
}

/// POST /api/v1/swaps/{id}/confirm
pub async fn confirm(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(swap_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let swap = swaps::confirm(&state.pool, auth.user_id, swap_id).await?;
    Ok(Json(ApiResponse::ok(swap)))
}

/// POST /api/v1/swaps/{id}/complete
pub async fn complete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(swap_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let swap = swaps::mark_completed(&state.pool, &state.event_bus, auth.user_id, swap_id).await?;
    Ok(Json(ApiResponse::ok(swap)))
}

/// GET /api/v1/swaps/{id}
pub async fn get_details(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(swap_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let details = swaps::details(&state.pool, auth.user_id, swap_id, state.media_base()).await?;
    Ok(Json(ApiResponse::ok(details)))
}

/// GET /api/v1/users/me/swaps
///
/// Swaps where the caller is the listing owner or the buyer.
pub async fn mine(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let swaps = SwapRepo::find_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(swaps)))
}

/// GET /api/v1/listings/{id}/swaps
pub async fn for_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_listing(&state.pool, listing_id, auth.user_id).await?;
    let swaps = SwapRepo::find_by_listing(&state.pool, listing_id).await?;
    Ok(Json(ApiResponse::ok(swaps)))
}
