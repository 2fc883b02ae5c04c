//! Negotiation engine: the offer state machine and the swap ledger.
//!
//! Every mutating operation runs in one transaction that locks the listing
//! row first, so all writers on a listing serialize on the same lock.
//! Events are published only after the transaction commits; a rolled-back
//! operation never notifies anyone.

pub mod offers;
pub mod swaps;

use swapshop_core::types::DbId;
use swapshop_db::repositories::UserRepo;
use swapshop_db::DbPool;

/// Display name used in notification text. Falls back to a neutral label
/// when the user cannot be loaded; notifications must not fail the caller.
pub(crate) async fn display_name(pool: &DbPool, user_id: DbId) -> String {
    match UserRepo::find_by_id(pool, user_id).await {
        Ok(Some(user)) => user.display_name().to_string(),
        Ok(None) => "Someone".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, user_id, "Could not load user for notification");
            "Someone".to_string()
        }
    }
}
