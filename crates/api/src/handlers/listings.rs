//! Handlers for the `/listings` resource.
//!
//! Browsing and detail reads are public. Writes require authentication and
//! are restricted to the listing owner.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use swapshop_core::error::CoreError;
use swapshop_core::listing::{
    ensure_owner, normalize_tags, validate_images, validate_price, validate_title,
    validate_wanted_items,
};
use swapshop_core::search::{clamp_limit, clamp_offset, like_pattern, DEFAULT_LIMIT, MAX_LIMIT};
use swapshop_core::types::DbId;
use swapshop_db::models::listing::{
    CreateListing, Listing, ListingDetail, ListingFilter, UpdateListing, WantedItemInput,
};
use swapshop_db::repositories::{CategoryRepo, ListingRepo, RecentViewRepo};
use swapshop_db::DbPool;
use swapshop_events::bus::LISTING_VIEWED;
use swapshop_events::MarketEvent;

use crate::engine::display_name;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::BrowseParams;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fail with a validation error unless the category exists.
async fn ensure_category(pool: &DbPool, field: &str, id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(pool, id).await?.is_none() {
        return Err(CoreError::Validation(format!("{field} {id} does not exist")).into());
    }
    Ok(())
}

fn validate_wanted(items: &[WantedItemInput]) -> Result<(), CoreError> {
    validate_wanted_items(items.iter().map(|w| w.item_name.as_str()))
}

/// Load a listing and check that `user_id` owns it.
pub(crate) async fn owned_listing(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<Listing> {
    let listing = ListingRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::not_found("Listing", id))?;
    ensure_owner(user_id, listing.user_id)?;
    Ok(listing)
}

fn summaries(listings: Vec<Listing>, media_base: &str) -> Vec<ListingDetail> {
    listings
        .into_iter()
        .map(|l| ListingDetail::summary(l, media_base))
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/listings
///
/// Create a listing together with its wanted items. New listings start
/// `active` and available.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateListing>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    validate_price(input.original_price)?;
    validate_images(&input.images)?;
    validate_wanted(&input.wanted_items)?;
    input.tags = normalize_tags(&input.tags)?;

    ensure_category(&state.pool, "category_id", input.category_id).await?;
    if let Some(wanted) = input.wanted_category_id {
        ensure_category(&state.pool, "wanted_category_id", wanted).await?;
    }

    let created = ListingRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        listing_id = created.listing.id,
        user_id = auth.user_id,
        wanted_items = created.wanted_items.len(),
        "Listing created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ListingDetail::new(created, state.media_base()))),
    ))
}

/// GET /api/v1/listings?category_id=&q=&limit=&offset=
///
/// Public browse of available listings, newest first.
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ListingFilter {
        category_id: params.category_id,
        pattern: like_pattern(params.q.as_deref()),
        limit: clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let listings = ListingRepo::browse(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::ok(summaries(listings, state.media_base()))))
}

/// GET /api/v1/listings/{id}
///
/// Listing detail with wanted items. Listings that left the market are
/// only visible to their owner. An authenticated viewer other than the
/// owner gets the view recorded; that write is advisory and never fails
/// the read.
pub async fn get_by_id(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let full = ListingRepo::find_with_wanted(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Listing", id))?;

    let viewer_id = viewer.map(|v| v.user_id);
    let is_owner = viewer_id == Some(full.listing.user_id);
    if !full.listing.is_available && !is_owner {
        return Err(AppError::not_found("Listing", id));
    }

    if let (Some(viewer_id), false) = (viewer_id, is_owner) {
        record_view(&state, viewer_id, &full.listing).await;
    }

    Ok(Json(ApiResponse::ok(ListingDetail::new(full, state.media_base()))))
}

async fn record_view(state: &AppState, viewer_id: DbId, listing: &Listing) {
    if let Err(e) = RecentViewRepo::record(&state.pool, viewer_id, listing.id).await {
        tracing::warn!(error = %e, listing_id = listing.id, viewer_id, "Failed to record view");
        return;
    }

    let viewer_name = display_name(&state.pool, viewer_id).await;
    state.event_bus.publish(
        MarketEvent::new(LISTING_VIEWED, listing.user_id)
            .with_source("listing", listing.id)
            .with_actor(viewer_id)
            .with_payload(serde_json::json!({
                "listing_title": listing.title,
                "actor_name": viewer_name,
            })),
    );
}

/// PUT /api/v1/listings/{id}
///
/// Owner-only update. When `wanted_items` is present the whole list is
/// replaced and priorities are re-derived from the array order.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateListing>,
) -> AppResult<impl IntoResponse> {
    owned_listing(&state.pool, id, auth.user_id).await?;

    if let Some(title) = input.title.as_deref() {
        validate_title(title)?;
    }
    validate_price(input.original_price)?;
    if let Some(images) = input.images.as_deref() {
        validate_images(images)?;
    }
    if let Some(items) = input.wanted_items.as_deref() {
        validate_wanted(items)?;
    }
    if let Some(tags) = input.tags.as_deref() {
        input.tags = Some(normalize_tags(tags)?);
    }
    if let Some(category_id) = input.category_id {
        ensure_category(&state.pool, "category_id", category_id).await?;
    }
    if let Some(wanted) = input.wanted_category_id {
        ensure_category(&state.pool, "wanted_category_id", wanted).await?;
    }

    let updated = ListingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Listing", id))?;

    tracing::info!(listing_id = id, user_id = auth.user_id, "Listing updated");
    Ok(Json(ApiResponse::ok(ListingDetail::new(updated, state.media_base()))))
}

/// DELETE /api/v1/listings/{id}
///
/// Owner-only hard delete. Wanted items, offers, swaps, likes and views go
/// with it.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_listing(&state.pool, id, auth.user_id).await?;

    if ListingRepo::delete(&state.pool, id).await? {
        tracing::info!(listing_id = id, user_id = auth.user_id, "Listing deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Listing", id))
    }
}

/// GET /api/v1/users/me/listings
///
/// The caller's own listings, including those no longer available.
pub async fn mine(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let listings = ListingRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(summaries(listings, state.media_base()))))
}
