//! Handlers for offers: `/listings/{id}/offers`, `/offers/{id}` and the
//! caller's sent/received lists.
//!
//! All endpoints require authentication. The state machine lives in
//! [`crate::engine::offers`]; these handlers only decode and encode.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use swapshop_core::types::DbId;
use swapshop_db::models::offer::{CreateOffer, UpdateOfferStatus};
use swapshop_db::repositories::{ListingRepo, OfferRepo};

use crate::engine::offers;
use crate::error::{AppError, AppResult};
use crate::handlers::listings::owned_listing;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/listings/{id}/offers
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
    Json(input): Json<CreateOffer>,
) -> AppResult<impl IntoResponse> {
    let offer =
        offers::create_offer(&state.pool, &state.event_bus, auth.user_id, listing_id, &input)
            .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(offer))))
}

/// PUT /api/v1/offers/{id}
///
/// Body `{ "status": "accepted" | "rejected" | "cancelled" }`. Accepting
/// returns the swap created alongside it.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(offer_id): Path<DbId>,
    Json(input): Json<UpdateOfferStatus>,
) -> AppResult<impl IntoResponse> {
    let change = offers::change_status(
        &state.pool,
        &state.event_bus,
        auth.user_id,
        offer_id,
        input.status.trim(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(change)))
}

/// POST /api/v1/offers/{id}/withdraw
pub async fn withdraw(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(offer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let offer = offers::withdraw(&state.pool, &state.event_bus, auth.user_id, offer_id).await?;
    Ok(Json(ApiResponse::ok(offer)))
}

/// GET /api/v1/offers/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(offer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let offer = OfferRepo::find_by_id(&state.pool, offer_id)
        .await?
        .ok_or(AppError::not_found("Offer", offer_id))?;
    let owner_id = ListingRepo::find_by_id(&state.pool, offer.product_id)
        .await?
        .map(|l| l.user_id);
    offers::ensure_can_view(&offer, owner_id, auth.user_id)?;
    Ok(Json(ApiResponse::ok(offer)))
}

/// GET /api/v1/users/me/offers/sent
pub async fn sent(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let offers = OfferRepo::list_sent(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(offers)))
}

/// GET /api/v1/users/me/offers/received
pub async fn received(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let offers = OfferRepo::list_received(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(offers)))
}

/// GET /api/v1/listings/{id}/offers
///
/// Every offer on a listing. Owner only.
pub async fn for_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_listing(&state.pool, listing_id, auth.user_id).await?;
    let offers = OfferRepo::list_for_listing(&state.pool, listing_id).await?;
    Ok(Json(ApiResponse::ok(offers)))
}
