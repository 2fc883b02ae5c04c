//! Swap entity model, DTOs, and the denormalized swap details view.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use swapshop_core::media::{public_url, public_urls};
use swapshop_core::offer::OfferStatus;
use swapshop_core::swap::SwapState;
use swapshop_core::types::{DbId, Timestamp};

/// A row from the `swaps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Swap {
    pub id: DbId,
    pub product_id: DbId,
    pub offer_id: DbId,
    /// Listing owner confirmed the hand-over.
    pub user_accepted: bool,
    /// Buyer confirmed the hand-over.
    pub buyer_accepted: bool,
    /// Completion flag; terminal once `true`.
    pub swaped: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /swaps`. Both ids are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSwap {
    pub product_id: Option<DbId>,
    pub offer_id: Option<DbId>,
}

/// Raw result of the swap details join. Every joined column is nullable
/// because referenced rows may be gone.
#[derive(Debug, Clone, FromRow)]
pub struct SwapDetailsRow {
    pub id: DbId,
    pub product_id: DbId,
    pub offer_id: DbId,
    pub user_accepted: bool,
    pub buyer_accepted: bool,
    pub swaped: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub product_title: Option<String>,
    pub product_condition: Option<String>,
    pub product_images: Option<Vec<String>>,
    pub offered_item_title: Option<String>,
    pub offered_item_condition: Option<String>,
    pub offered_item_images: Option<Vec<String>>,
    pub offer_status: Option<OfferStatus>,
    pub owner_id: Option<DbId>,
    pub owner_username: Option<String>,
    pub owner_fullname: Option<String>,
    pub owner_profile_image: Option<String>,
    pub buyer_id: Option<DbId>,
    pub buyer_username: Option<String>,
    pub buyer_fullname: Option<String>,
    pub buyer_profile_image: Option<String>,
}

/// One side of a swap as shown in the details view.
#[derive(Debug, Clone, Serialize)]
pub struct SwapPartyView {
    pub id: Option<DbId>,
    pub name: String,
    pub avatar_url: String,
}

/// Denormalized, read-only swap view. Missing joined rows degrade to
/// empty strings and empty lists instead of failing the read.
#[derive(Debug, Clone, Serialize)]
pub struct SwapDetails {
    pub id: DbId,
    pub product_id: DbId,
    pub offer_id: DbId,
    pub product_title: String,
    pub product_condition: String,
    pub product_images: Vec<String>,
    pub offered_item_title: String,
    pub offered_item_condition: String,
    pub offered_item_images: Vec<String>,
    pub offer_status: Option<OfferStatus>,
    pub owner: SwapPartyView,
    pub buyer: SwapPartyView,
    pub user_accepted: bool,
    pub buyer_accepted: bool,
    pub swaped: bool,
    /// `"Completed"` once `swaped`, otherwise `"Pending"`.
    pub status: &'static str,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn party(
    id: Option<DbId>,
    username: Option<String>,
    fullname: Option<String>,
    image: Option<String>,
    media_base: &str,
) -> SwapPartyView {
    let name = fullname
        .filter(|n| !n.trim().is_empty())
        .or(username)
        .unwrap_or_default();
    let avatar_url = image
        .as_deref()
        .and_then(|f| public_url(media_base, f))
        .unwrap_or_default();
    SwapPartyView {
        id,
        name,
        avatar_url,
    }
}

impl SwapDetails {
    pub fn from_row(row: SwapDetailsRow, media_base: &str) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            offer_id: row.offer_id,
            product_title: row.product_title.unwrap_or_default(),
            product_condition: row.product_condition.unwrap_or_default(),
            product_images: public_urls(media_base, &row.product_images.unwrap_or_default()),
            offered_item_title: row.offered_item_title.unwrap_or_default(),
            offered_item_condition: row.offered_item_condition.unwrap_or_default(),
            offered_item_images: public_urls(
                media_base,
                &row.offered_item_images.unwrap_or_default(),
            ),
            offer_status: row.offer_status,
            owner: party(
                row.owner_id,
                row.owner_username,
                row.owner_fullname,
                row.owner_profile_image,
                media_base,
            ),
            buyer: party(
                row.buyer_id,
                row.buyer_username,
                row.buyer_fullname,
                row.buyer_profile_image,
                media_base,
            ),
            user_accepted: row.user_accepted,
            buyer_accepted: row.buyer_accepted,
            swaped: row.swaped,
            status: SwapState::from_flag(row.swaped).label(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
