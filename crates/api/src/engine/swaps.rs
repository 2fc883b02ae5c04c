//! Swap creation, confirmation and completion.

use swapshop_core::error::CoreError;
use swapshop_core::listing::ensure_owner;
use swapshop_core::offer::{transition, Actor, OfferStatus};
use swapshop_core::swap::{party_for, SwapParty};
use swapshop_core::types::DbId;
use swapshop_db::models::swap::{CreateSwap, Swap, SwapDetails};
use swapshop_db::repositories::{ListingRepo, OfferRepo, SwapRepo};
use swapshop_db::DbPool;
use swapshop_events::bus::SWAP_COMPLETED;
use swapshop_events::{EventBus, MarketEvent};

use crate::error::{AppError, AppResult};

/// Record the swap for an accepted offer on behalf of the listing owner.
///
/// Idempotent: when the offer already has a swap (accepting creates one),
/// that swap is returned unchanged.
pub async fn create_swap(
    pool: &DbPool,
    user_id: DbId,
    input: &CreateSwap,
) -> AppResult<Swap> {
    let (Some(product_id), Some(offer_id)) = (input.product_id, input.offer_id) else {
        return Err(
            CoreError::Validation("product_id and offer_id are required".to_string()).into(),
        );
    };

    let mut tx = pool.begin().await?;

    let listing = ListingRepo::lock_in_tx(&mut tx, product_id)
        .await?
        .ok_or(AppError::not_found("Listing", product_id))?;
    ensure_owner(user_id, listing.user_id)?;

    let offer = OfferRepo::lock_in_tx(&mut tx, offer_id)
        .await?
        .ok_or(AppError::not_found("Offer", offer_id))?;
    if offer.product_id != listing.id {
        return Err(CoreError::Validation(format!(
            "Offer {offer_id} was not made on listing {product_id}"
        ))
        .into());
    }
    if !matches!(offer.status, OfferStatus::Accepted | OfferStatus::Completed) {
        return Err(CoreError::Conflict(format!(
            "Offer {offer_id} is {} and cannot be swapped",
            offer.status
        ))
        .into());
    }

    let swap = SwapRepo::create_or_get_in_tx(&mut tx, listing.id, offer.id).await?;
    tx.commit().await?;

    tracing::info!(swap_id = swap.id, offer_id, listing_id = product_id, "Swap recorded");
    Ok(swap)
}

/// Record that one party confirmed the hand-over.
pub async fn confirm(pool: &DbPool, user_id: DbId, swap_id: DbId) -> AppResult<Swap> {
    let swap = SwapRepo::find_by_id(pool, swap_id)
        .await?
        .ok_or(AppError::not_found("Swap", swap_id))?;
    let party = resolve_party(pool, &swap, user_id).await?;

    let swap = SwapRepo::confirm(pool, swap.id, party == SwapParty::Owner)
        .await?
        .ok_or(AppError::not_found("Swap", swap_id))?;

    tracing::info!(swap_id, user_id, ?party, "Swap confirmed");
    Ok(swap)
}

/// Complete a swap.
///
/// In one transaction: the swap is flagged `swaped`, its listing leaves
/// the market (`is_available = false`, `status = swapped`) and the offer
/// moves `accepted -> completed`. Completing an already completed swap
/// returns it unchanged.
pub async fn mark_completed(
    pool: &DbPool,
    bus: &EventBus,
    user_id: DbId,
    swap_id: DbId,
) -> AppResult<Swap> {
    let product_id = SwapRepo::find_by_id(pool, swap_id)
        .await?
        .ok_or(AppError::not_found("Swap", swap_id))?
        .product_id;

    let mut tx = pool.begin().await?;

    let listing = ListingRepo::lock_in_tx(&mut tx, product_id)
        .await?
        .ok_or(AppError::not_found("Listing", product_id))?;
    let swap = SwapRepo::lock_in_tx(&mut tx, swap_id)
        .await?
        .ok_or(AppError::not_found("Swap", swap_id))?;
    let offer = OfferRepo::lock_in_tx(&mut tx, swap.offer_id)
        .await?
        .ok_or(AppError::not_found("Offer", swap.offer_id))?;

    party_for(user_id, listing.user_id, offer.buyer_id)?;

    if swap.swaped {
        tx.rollback().await?;
        return Ok(swap);
    }

    if offer.status != OfferStatus::Completed {
        let to = transition(offer.status, OfferStatus::Completed, Actor::System)?;
        OfferRepo::set_status_in_tx(&mut tx, offer.id, to).await?;
    }
    ListingRepo::mark_swapped_in_tx(&mut tx, listing.id).await?;
    let swap = SwapRepo::mark_completed_in_tx(&mut tx, swap.id).await?;

    tx.commit().await?;

    tracing::info!(swap_id, listing_id = listing.id, offer_id = offer.id, "Swap completed");

    let payload = serde_json::json!({ "listing_title": listing.title });
    bus.publish_all([listing.user_id, offer.buyer_id].map(|recipient| {
        MarketEvent::new(SWAP_COMPLETED, recipient)
            .with_source("swap", swap.id)
            .with_payload(payload.clone())
    }));

    Ok(swap)
}

/// Denormalized swap view, readable by either party.
pub async fn details(
    pool: &DbPool,
    user_id: DbId,
    swap_id: DbId,
    media_base: &str,
) -> AppResult<SwapDetails> {
    let row = SwapRepo::find_details(pool, swap_id)
        .await?
        .ok_or(AppError::not_found("Swap", swap_id))?;

    if row.owner_id != Some(user_id) && row.buyer_id != Some(user_id) {
        return Err(CoreError::Forbidden(
            "Only the parties to a swap may access it".to_string(),
        )
        .into());
    }

    Ok(SwapDetails::from_row(row, media_base))
}

/// Which side of the swap `user_id` is on, or `Forbidden`.
async fn resolve_party(pool: &DbPool, swap: &Swap, user_id: DbId) -> AppResult<SwapParty> {
    let listing = ListingRepo::find_by_id(pool, swap.product_id)
        .await?
        .ok_or(AppError::not_found("Listing", swap.product_id))?;
    let offer = OfferRepo::find_by_id(pool, swap.offer_id)
        .await?
        .ok_or(AppError::not_found("Offer", swap.offer_id))?;
    Ok(party_for(user_id, listing.user_id, offer.buyer_id)?)
}
