//! Swap parties and the derived swap status label.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Display label of a swap, derived from its completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwapState {
    Pending,
    Completed,
}

impl SwapState {
    pub fn from_flag(swaped: bool) -> Self {
        if swaped {
            Self::Completed
        } else {
            Self::Pending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

/// Which side of a swap a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapParty {
    /// Owner of the listing.
    Owner,
    /// Buyer whose offer was accepted.
    Buyer,
}

/// Resolve the party `user_id` plays in a swap, or fail with `Forbidden`.
pub fn party_for(user_id: DbId, owner_id: DbId, buyer_id: DbId) -> Result<SwapParty, CoreError> {
    if user_id == owner_id {
        Ok(SwapParty::Owner)
    } else if user_id == buyer_id {
        Ok(SwapParty::Buyer)
    } else {
        Err(CoreError::Forbidden(
            "Only the parties to a swap may access it".to_string(),
        ))
    }
}
