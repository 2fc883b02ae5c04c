//! Offer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use swapshop_core::offer::OfferStatus;
use swapshop_core::types::{DbId, Timestamp};

/// A row from the `offers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Offer {
    pub id: DbId,
    pub product_id: DbId,
    pub buyer_id: DbId,
    /// Listing owner captured when the offer was made.
    pub seller_id: DbId,
    pub offered_item_title: String,
    pub offered_item_description: Option<String>,
    pub offered_item_condition: Option<String>,
    pub offered_item_images: Vec<String>,
    pub message: Option<String>,
    pub status: OfferStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for making an offer on a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOffer {
    pub offered_item_title: String,
    pub offered_item_description: Option<String>,
    pub offered_item_condition: Option<String>,
    #[serde(default)]
    pub offered_item_images: Vec<String>,
    pub message: Option<String>,
}

/// Request body for `PUT /offers/{id}`.
///
/// Kept as a string so an unknown value surfaces as an invalid transition
/// rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOfferStatus {
    pub status: String,
}
