//! Like and recent-view models. Advisory only; never consulted by negotiation.

use serde::Serialize;
use sqlx::FromRow;
use swapshop_core::types::{DbId, Timestamp};

/// A row from the `liked_products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub created_at: Timestamp,
}

/// A row from the `recent_views` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentView {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub viewed_at: Timestamp,
}
