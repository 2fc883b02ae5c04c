//! Handlers for likes and recently viewed listings.
//!
//! Engagement is advisory: these rows are never consulted by negotiation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use swapshop_core::search::{clamp_limit, DEFAULT_LIMIT, MAX_LIMIT};
use swapshop_core::types::DbId;
use swapshop_db::models::listing::ListingDetail;
use swapshop_db::repositories::{LikeRepo, ListingRepo, RecentViewRepo};
use swapshop_events::bus::LISTING_LIKED;
use swapshop_events::MarketEvent;

use crate::engine::display_name;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/listings/{id}/like
///
/// Idempotent. The owner is notified only when the like is new.
pub async fn like(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = ListingRepo::find_by_id(&state.pool, listing_id)
        .await?
        .ok_or(AppError::not_found("Listing", listing_id))?;

    let created = LikeRepo::like(&state.pool, auth.user_id, listing.id).await?;
    if created {
        let liker = display_name(&state.pool, auth.user_id).await;
        state.event_bus.publish(
            MarketEvent::new(LISTING_LIKED, listing.user_id)
                .with_source("listing", listing.id)
                .with_actor(auth.user_id)
                .with_payload(serde_json::json!({
                    "listing_title": listing.title,
                    "actor_name": liker,
                })),
        );
    }

    Ok(Json(ApiResponse::ok(serde_json::json!({
        "product_id": listing.id,
        "liked": true,
    }))))
}

/// DELETE /api/v1/listings/{id}/like
pub async fn unlike(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<StatusCode> {
    LikeRepo::unlike(&state.pool, auth.user_id, listing_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/me/likes
pub async fn my_likes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let listings = LikeRepo::liked_listings(&state.pool, auth.user_id).await?;
    let media_base = state.media_base();
    let data: Vec<ListingDetail> = listings
        .into_iter()
        .map(|l| ListingDetail::summary(l, media_base))
        .collect();
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/v1/users/me/recent-views?limit=
pub async fn recent_views(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let views = RecentViewRepo::list_for_user(&state.pool, auth.user_id, limit).await?;
    Ok(Json(ApiResponse::ok(views)))
}

/// DELETE /api/v1/users/me/recent-views/{product_id}
pub async fn forget_view(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RecentViewRepo::delete(&state.pool, auth.user_id, product_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("RecentView", product_id))
    }
}
