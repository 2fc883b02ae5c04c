//! Listing statuses, swap preferences, and listing input rules.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of a listing title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum number of images per listing.
pub const MAX_IMAGES: usize = 10;

/// Maximum number of distinct tags per listing.
pub const MAX_TAGS: usize = 20;

/// Maximum number of wanted items per listing.
pub const MAX_WANTED_ITEMS: usize = 10;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Negotiation status of a listing. Stored as the `listing_status` Postgres enum.
///
/// `active` listings take offers. Accepting an offer moves the listing to
/// `pending`; completing the resulting swap moves it to `swapped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "listing_status", rename_all = "lowercase")
)]
pub enum ListingStatus {
    Active,
    Pending,
    Swapped,
}

impl ListingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Swapped => "swapped",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the owner is willing to hand the item over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "swap_preference", rename_all = "lowercase")
)]
pub enum SwapPreference {
    Local,
    Shipping,
    #[default]
    Both,
}

// ---------------------------------------------------------------------------
// Negotiation gate
// ---------------------------------------------------------------------------

/// Whether a listing in this state may receive new offers.
pub fn accepts_offers(is_available: bool, status: ListingStatus) -> bool {
    is_available && status == ListingStatus::Active
}

/// Fail with [`CoreError::Unavailable`] unless the listing accepts offers.
pub fn ensure_accepts_offers(
    listing_id: DbId,
    is_available: bool,
    status: ListingStatus,
) -> Result<(), CoreError> {
    if accepts_offers(is_available, status) {
        Ok(())
    } else {
        Err(CoreError::Unavailable(format!(
            "Listing {listing_id} is not open for offers"
        )))
    }
}

/// Fail with [`CoreError::Forbidden`] unless `user_id` owns the listing.
pub fn ensure_owner(user_id: DbId, owner_id: DbId) -> Result<(), CoreError> {
    if user_id != owner_id {
        return Err(CoreError::Forbidden(
            "Only the listing owner may do this".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Wanted items
// ---------------------------------------------------------------------------

/// Priority of the wanted item at `index` in the submitted list (1-based).
///
/// Priorities are re-derived from the array position on every write.
pub fn priority_for_index(index: usize) -> i32 {
    i32::try_from(index).map_or(i32::MAX, |i| i.saturating_add(1))
}

/// Validate the names of a submitted wanted-item list.
pub fn validate_wanted_items<'a>(
    names: impl ExactSizeIterator<Item = &'a str>,
) -> Result<(), CoreError> {
    if names.len() > MAX_WANTED_ITEMS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_WANTED_ITEMS} wanted items are allowed"
        )));
    }
    for (i, name) in names.enumerate() {
        if name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "wanted_items[{i}].item_name is required"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a listing title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an optional price. Prices may be zero but never negative.
pub fn validate_price(price: Option<f64>) -> Result<(), CoreError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(CoreError::Validation(
            "original_price must be a non-negative number".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Validate the image references of a listing.
pub fn validate_images(images: &[String]) -> Result<(), CoreError> {
    if images.len() > MAX_IMAGES {
        return Err(CoreError::Validation(format!(
            "At most {MAX_IMAGES} images are allowed"
        )));
    }
    if images.iter().any(|i| i.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Image references must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Normalize a tag list into a set: trimmed, lowercased, deduplicated, sorted.
///
/// Fails when more than [`MAX_TAGS`] distinct tags remain.
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, CoreError> {
    let set: BTreeSet<String> = tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if set.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_TAGS} tags are allowed"
        )));
    }
    Ok(set.into_iter().collect())
}
