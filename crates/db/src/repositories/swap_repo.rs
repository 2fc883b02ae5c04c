//! Repository for the `swaps` table and the swap details join.

use sqlx::PgPool;
use swapshop_core::types::DbId;

use crate::models::swap::{Swap, SwapDetailsRow};

/// Column list for the `swaps` table.
const COLUMNS: &str =
    "id, product_id, offer_id, user_accepted, buyer_accepted, swaped, created_at, updated_at";

/// Same columns, qualified with the `s` alias used in joins.
const S_COLUMNS: &str = "s.id, s.product_id, s.offer_id, s.user_accepted, s.buyer_accepted, \
    s.swaped, s.created_at, s.updated_at";

/// Provides persistence for swaps.
pub struct SwapRepo;

impl SwapRepo {
    /// Find a swap by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Swap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swaps WHERE id = $1");
        sqlx::query_as::<_, Swap>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The swap created for an offer, if any.
    pub async fn find_by_offer(pool: &PgPool, offer_id: DbId) -> Result<Option<Swap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swaps WHERE offer_id = $1");
        sqlx::query_as::<_, Swap>(&query)
            .bind(offer_id)
            .fetch_optional(pool)
            .await
    }

    /// Swaps where the user owns the listing or made the offer, most recent
    /// first.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Swap>, sqlx::Error> {
        let query = format!(
            "SELECT {S_COLUMNS} FROM swaps s \
             JOIN products p ON p.id = s.product_id \
             WHERE p.user_id = $1 \
             UNION \
             SELECT {S_COLUMNS} FROM swaps s \
             JOIN offers o ON o.id = s.offer_id \
             WHERE o.buyer_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Swap>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Swaps on one listing, most recent first.
    pub async fn find_by_listing(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<Swap>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM swaps \
             WHERE product_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Swap>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Denormalized read across swap, listing, offer and both users.
    ///
    /// Every join is a LEFT JOIN so missing rows surface as `NULL`s.
    pub async fn find_details(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SwapDetailsRow>, sqlx::Error> {
        let query = format!(
            "SELECT {S_COLUMNS}, \
                p.title AS product_title, \
                p.condition AS product_condition, \
                p.images AS product_images, \
                o.offered_item_title, \
                o.offered_item_condition, \
                o.offered_item_images, \
                o.status AS offer_status, \
                owner.id AS owner_id, \
                owner.username AS owner_username, \
                owner.fullname AS owner_fullname, \
                owner.profile_image AS owner_profile_image, \
                buyer.id AS buyer_id, \
                buyer.username AS buyer_username, \
                buyer.fullname AS buyer_fullname, \
                buyer.profile_image AS buyer_profile_image \
             FROM swaps s \
             LEFT JOIN products p ON p.id = s.product_id \
             LEFT JOIN offers o ON o.id = s.offer_id \
             LEFT JOIN users owner ON owner.id = p.user_id \
             LEFT JOIN users buyer ON buyer.id = o.buyer_id \
             WHERE s.id = $1"
        );
        sqlx::query_as::<_, SwapDetailsRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record one party's confirmation. Returns `None` if the swap is gone.
    pub async fn confirm(
        pool: &PgPool,
        id: DbId,
        by_owner: bool,
    ) -> Result<Option<Swap>, sqlx::Error> {
        let column = if by_owner {
            "user_accepted"
        } else {
            "buyer_accepted"
        };
        let query = format!("UPDATE swaps SET {column} = true WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Swap>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Transaction-scoped operations
    // -----------------------------------------------------------------------

    /// Insert the swap for an accepted offer, or return the existing one.
    ///
    /// `uq_swaps_offer_id` guarantees at most one swap per offer, so a
    /// repeated call is a no-op that yields the original row.
    pub async fn create_or_get_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: DbId,
        offer_id: DbId,
    ) -> Result<Swap, sqlx::Error> {
        let insert_query = format!(
            "INSERT INTO swaps (product_id, offer_id) \
             VALUES ($1, $2) \
             ON CONFLICT (offer_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Swap>(&insert_query)
            .bind(product_id)
            .bind(offer_id)
            .fetch_optional(&mut **tx)
            .await?;
        if let Some(swap) = inserted {
            return Ok(swap);
        }

        let query = format!("SELECT {COLUMNS} FROM swaps WHERE offer_id = $1");
        sqlx::query_as::<_, Swap>(&query)
            .bind(offer_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Load a swap and hold a row lock on it until the transaction ends.
    pub async fn lock_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Swap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swaps WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Swap>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Set the completion flag.
    pub async fn mark_completed_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Swap, sqlx::Error> {
        let query = format!("UPDATE swaps SET swaped = true WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Swap>(&query)
            .bind(id)
            .fetch_one(&mut **tx)
            .await
    }
}
