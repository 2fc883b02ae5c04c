//! Offer creation and status transitions.

use serde::Serialize;
use swapshop_core::error::CoreError;
use swapshop_core::listing::{ensure_accepts_offers, ensure_owner, ListingStatus};
use swapshop_core::offer::{
    ensure_not_own_listing, transition, validate_offer_input, Actor, OfferStatus,
};
use swapshop_core::types::DbId;
use swapshop_db::models::offer::{CreateOffer, Offer};
use swapshop_db::models::swap::Swap;
use swapshop_db::repositories::{ListingRepo, OfferRepo, SwapRepo};
use swapshop_db::DbPool;
use swapshop_events::bus::{
    OFFER_ACCEPTED, OFFER_CANCELLED, OFFER_CREATED, OFFER_REJECTED, OFFER_WITHDRAWN,
};
use swapshop_events::{EventBus, MarketEvent};

use crate::error::{AppError, AppResult};

/// Result of a status change. `swap` is set when the offer was accepted.
#[derive(Debug, Serialize)]
pub struct StatusChange {
    pub offer: Offer,
    pub swap: Option<Swap>,
    /// Ids of sibling offers rejected by the accept cascade.
    pub rejected_offer_ids: Vec<DbId>,
}

/// Make an offer on a listing.
///
/// Fails with `NotFound` when the listing is missing, `Validation` for bad
/// input or an offer on one's own listing, `Unavailable` when the listing
/// no longer takes offers, and `Conflict` when the buyer already has a
/// pending offer on it.
pub async fn create_offer(
    pool: &DbPool,
    bus: &EventBus,
    buyer_id: DbId,
    listing_id: DbId,
    input: &CreateOffer,
) -> AppResult<Offer> {
    validate_offer_input(
        &input.offered_item_title,
        input.offered_item_description.as_deref(),
        &input.offered_item_images,
        input.message.as_deref(),
    )?;

    let mut tx = pool.begin().await?;

    let listing = ListingRepo::lock_in_tx(&mut tx, listing_id)
        .await?
        .ok_or(AppError::not_found("Listing", listing_id))?;

    ensure_not_own_listing(buyer_id, listing.user_id)?;
    ensure_accepts_offers(listing.id, listing.is_available, listing.status)?;

    if OfferRepo::find_pending_in_tx(&mut tx, buyer_id, listing.id)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(
            "You already have a pending offer on this listing".to_string(),
        )
        .into());
    }

    let offer =
        OfferRepo::create_in_tx(&mut tx, listing.id, buyer_id, listing.user_id, input).await?;
    tx.commit().await?;

    tracing::info!(
        offer_id = offer.id,
        listing_id = listing.id,
        buyer_id,
        "Offer created"
    );

    let buyer_name = super::display_name(pool, buyer_id).await;
    bus.publish(
        MarketEvent::new(OFFER_CREATED, offer.seller_id)
            .with_source("offer", offer.id)
            .with_actor(buyer_id)
            .with_payload(serde_json::json!({
                "listing_title": listing.title,
                "actor_name": buyer_name,
                "offered_item": offer.offered_item_title,
            })),
    );

    Ok(offer)
}

/// Move an offer to `new_status` on behalf of the listing owner.
///
/// Accepting runs the whole cascade in one transaction: the offer becomes
/// `accepted`, every other pending offer on the listing becomes `rejected`,
/// the listing becomes `pending`, and the swap for the offer is created.
pub async fn change_status(
    pool: &DbPool,
    bus: &EventBus,
    user_id: DbId,
    offer_id: DbId,
    new_status: &str,
) -> AppResult<StatusChange> {
    // Unlocked read to find the listing; the listing lock is always taken first.
    let product_id = OfferRepo::find_by_id(pool, offer_id)
        .await?
        .ok_or(AppError::not_found("Offer", offer_id))?
        .product_id;

    let mut tx = pool.begin().await?;

    let listing = ListingRepo::lock_in_tx(&mut tx, product_id)
        .await?
        .ok_or(AppError::not_found("Listing", product_id))?;
    let offer = OfferRepo::lock_in_tx(&mut tx, offer_id)
        .await?
        .ok_or(AppError::not_found("Offer", offer_id))?;

    ensure_owner(user_id, listing.user_id)?;
    let to: OfferStatus = new_status.parse()?;
    transition(offer.status, to, Actor::ListingOwner)?;

    let offer = OfferRepo::set_status_in_tx(&mut tx, offer.id, to).await?;

    let (swap, rejected) = if to == OfferStatus::Accepted {
        let rejected =
            OfferRepo::reject_pending_siblings_in_tx(&mut tx, listing.id, offer.id).await?;
        ListingRepo::set_status_in_tx(&mut tx, listing.id, ListingStatus::Pending).await?;
        let swap = SwapRepo::create_or_get_in_tx(&mut tx, listing.id, offer.id).await?;
        (Some(swap), rejected)
    } else {
        (None, Vec::new())
    };

    tx.commit().await?;

    tracing::info!(
        offer_id = offer.id,
        listing_id = listing.id,
        status = %offer.status,
        auto_rejected = rejected.len(),
        "Offer status changed"
    );

    let event_type = match to {
        OfferStatus::Accepted => OFFER_ACCEPTED,
        OfferStatus::Rejected => OFFER_REJECTED,
        _ => OFFER_CANCELLED,
    };
    let payload = serde_json::json!({ "listing_title": listing.title });
    bus.publish(
        MarketEvent::new(event_type, offer.buyer_id)
            .with_source("offer", offer.id)
            .with_actor(user_id)
            .with_payload(payload.clone()),
    );
    bus.publish_all(rejected.iter().map(|sibling| {
        MarketEvent::new(OFFER_REJECTED, sibling.buyer_id)
            .with_source("offer", sibling.id)
            .with_payload(payload.clone())
    }));

    Ok(StatusChange {
        offer,
        swap,
        rejected_offer_ids: rejected.iter().map(|o| o.id).collect(),
    })
}

/// Let the buyer withdraw their own pending offer.
pub async fn withdraw(
    pool: &DbPool,
    bus: &EventBus,
    user_id: DbId,
    offer_id: DbId,
) -> AppResult<Offer> {
    let product_id = OfferRepo::find_by_id(pool, offer_id)
        .await?
        .ok_or(AppError::not_found("Offer", offer_id))?
        .product_id;

    let mut tx = pool.begin().await?;

    let listing = ListingRepo::lock_in_tx(&mut tx, product_id)
        .await?
        .ok_or(AppError::not_found("Listing", product_id))?;
    let offer = OfferRepo::lock_in_tx(&mut tx, offer_id)
        .await?
        .ok_or(AppError::not_found("Offer", offer_id))?;

    if offer.buyer_id != user_id {
        return Err(
            CoreError::Forbidden("Only the buyer may withdraw an offer".to_string()).into(),
        );
    }
    let to = transition(offer.status, OfferStatus::Cancelled, Actor::Buyer)?;
    let offer = OfferRepo::set_status_in_tx(&mut tx, offer.id, to).await?;

    tx.commit().await?;

    tracing::info!(offer_id = offer.id, listing_id = listing.id, "Offer withdrawn");

    let buyer_name = super::display_name(pool, user_id).await;
    bus.publish(
        MarketEvent::new(OFFER_WITHDRAWN, offer.seller_id)
            .with_source("offer", offer.id)
            .with_actor(user_id)
            .with_payload(serde_json::json!({
                "listing_title": listing.title,
                "actor_name": buyer_name,
            })),
    );

    Ok(offer)
}

/// Whether `user_id` may read the offer: its buyer or the listing owner.
pub fn ensure_can_view(
    offer: &Offer,
    listing_owner_id: Option<DbId>,
    user_id: DbId,
) -> AppResult<()> {
    if offer.buyer_id == user_id || listing_owner_id == Some(user_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the buyer or the listing owner may view this offer".to_string(),
        )
        .into())
    }
}
