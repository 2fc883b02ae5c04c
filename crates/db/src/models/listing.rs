//! Listing (`products` table) and wanted-item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use swapshop_core::listing::{ListingStatus, SwapPreference};
use swapshop_core::media::public_urls;
use swapshop_core::types::{DbId, Timestamp};

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    /// Owner; never changes after creation.
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: DbId,
    pub condition: Option<String>,
    pub original_price: Option<f64>,
    pub tags: Vec<String>,
    /// Stored image file names, in display order.
    pub images: Vec<String>,
    pub wanted_category_id: Option<DbId>,
    pub wanted_condition: Option<String>,
    pub wanted_price_range: Option<String>,
    pub additional_notes: Option<String>,
    pub swap_preference: SwapPreference,
    pub negotiable: bool,
    pub location: Option<String>,
    pub status: ListingStatus,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `wanted_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WantedItem {
    pub id: DbId,
    pub product_id: DbId,
    pub item_name: String,
    pub description: Option<String>,
    /// 1-based position in the owner's list, re-derived on every write.
    pub priority: i32,
    pub created_at: Timestamp,
}

/// A wanted item as submitted by the client. Priority comes from its position.
#[derive(Debug, Clone, Deserialize)]
pub struct WantedItemInput {
    pub item_name: String,
    pub description: Option<String>,
}

/// DTO for creating a listing together with its wanted items.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListing {
    pub title: String,
    pub description: Option<String>,
    pub category_id: DbId,
    pub condition: Option<String>,
    pub original_price: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub wanted_category_id: Option<DbId>,
    pub wanted_condition: Option<String>,
    pub wanted_price_range: Option<String>,
    pub additional_notes: Option<String>,
    pub swap_preference: Option<SwapPreference>,
    pub negotiable: Option<bool>,
    pub location: Option<String>,
    #[serde(default)]
    pub wanted_items: Vec<WantedItemInput>,
}

/// DTO for updating a listing. Only non-`None` fields are applied.
///
/// `wanted_items`, when present, replaces the whole wanted-item list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListing {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub condition: Option<String>,
    pub original_price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub wanted_category_id: Option<DbId>,
    pub wanted_condition: Option<String>,
    pub wanted_price_range: Option<String>,
    pub additional_notes: Option<String>,
    pub swap_preference: Option<SwapPreference>,
    pub negotiable: Option<bool>,
    pub location: Option<String>,
    pub wanted_items: Option<Vec<WantedItemInput>>,
}

/// Filter for the public browse query.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub category_id: Option<DbId>,
    /// Pre-built `ILIKE` pattern (see `swapshop_core::search::like_pattern`).
    pub pattern: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// A listing together with its wanted items, ordered by priority.
#[derive(Debug, Clone)]
pub struct ListingWithWanted {
    pub listing: Listing,
    pub wanted_items: Vec<WantedItem>,
}

/// Listing with resolved image URLs and its wanted items, for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub listing: Listing,
    pub image_urls: Vec<String>,
    pub wanted_items: Vec<WantedItem>,
}

impl ListingDetail {
    pub fn new(full: ListingWithWanted, media_base: &str) -> Self {
        let image_urls = public_urls(media_base, &full.listing.images);
        Self {
            listing: full.listing,
            image_urls,
            wanted_items: full.wanted_items,
        }
    }

    /// Detail view without wanted items, used by list endpoints.
    pub fn summary(listing: Listing, media_base: &str) -> Self {
        Self::new(
            ListingWithWanted {
                listing,
                wanted_items: Vec::new(),
            },
            media_base,
        )
    }
}
