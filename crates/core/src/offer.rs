//! Offer status state machine and offer input validation.
//!
//! An offer starts `pending` and leaves that state exactly once. Who may
//! move it, and where to, is encoded in [`transition`]; callers never
//! compare status strings by hand.
//!
//! ```text
//! pending  -> accepted   listing owner (triggers the sibling cascade)
//! pending  -> rejected   listing owner, or the system during a cascade
//! pending  -> cancelled  listing owner, or the buyer withdrawing
//! accepted -> completed  system, when the swap for the offer completes
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid offer statuses, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_ACCEPTED,
    STATUS_REJECTED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of the offered item's title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of the offered item's description.
pub const MAX_DESCRIPTION_LEN: usize = 2_000;

/// Maximum length of the message attached to an offer.
pub const MAX_MESSAGE_LEN: usize = 1_000;

/// Maximum number of images of the offered item.
pub const MAX_IMAGES: usize = 10;

// ---------------------------------------------------------------------------
// OfferStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an offer. Stored as the `offer_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "offer_status", rename_all = "lowercase")
)]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl OfferStatus {
    /// Return the database string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Accepted => STATUS_ACCEPTED,
            Self::Rejected => STATUS_REJECTED,
            Self::Completed => STATUS_COMPLETED,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_ACCEPTED => Ok(Self::Accepted),
            STATUS_REJECTED => Ok(Self::Rejected),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// The party requesting a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The owner of the listing the offer targets.
    ListingOwner,
    /// The user who made the offer.
    Buyer,
    /// The service itself (accept cascade, swap completion).
    System,
}

/// Validate a status change and return the new status.
///
/// Anything not listed in the module-level table fails with
/// [`CoreError::InvalidTransition`], including a no-op `pending -> pending`
/// and every attempt to leave `accepted`, `rejected`, `completed` or
/// `cancelled` through a user request.
pub fn transition(
    from: OfferStatus,
    to: OfferStatus,
    actor: Actor,
) -> Result<OfferStatus, CoreError> {
    use OfferStatus::*;

    let allowed = match actor {
        Actor::ListingOwner => from == Pending && matches!(to, Accepted | Rejected | Cancelled),
        Actor::Buyer => from == Pending && to == Cancelled,
        Actor::System => matches!((from, to), (Pending, Rejected) | (Accepted, Completed)),
    };

    if allowed {
        Ok(to)
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject offers a buyer makes against their own listing.
pub fn ensure_not_own_listing(buyer_id: DbId, owner_id: DbId) -> Result<(), CoreError> {
    if buyer_id == owner_id {
        return Err(CoreError::Validation(
            "You cannot make an offer on your own listing".to_string(),
        ));
    }
    Ok(())
}

/// Validate the offered item and message supplied with a new offer.
pub fn validate_offer_input(
    title: &str,
    description: Option<&str>,
    images: &[String],
    message: Option<&str>,
) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation(
            "offered_item_title is required".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "offered_item_title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN) {
        return Err(CoreError::Validation(format!(
            "offered_item_description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    if images.len() > MAX_IMAGES {
        return Err(CoreError::Validation(format!(
            "At most {MAX_IMAGES} images may be attached to an offer"
        )));
    }
    if images.iter().any(|i| i.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Image references must not be empty".to_string(),
        ));
    }
    if message.is_some_and(|m| m.chars().count() > MAX_MESSAGE_LEN) {
        return Err(CoreError::Validation(format!(
            "message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(())
}
