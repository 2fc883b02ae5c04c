//! Repository for the `liked_products` table.

use sqlx::PgPool;
use swapshop_core::types::DbId;

use crate::models::engagement::Like;
use crate::models::listing::Listing;

/// Provides like/unlike operations on listings.
pub struct LikeRepo;

impl LikeRepo {
    /// Like a listing (idempotent).
    ///
    /// Returns `true` when a new like was recorded, `false` if it existed.
    pub async fn like(pool: &PgPool, user_id: DbId, product_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO liked_products (user_id, product_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id, product_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a like. Returns `true` if one was removed.
    pub async fn unlike(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM liked_products WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Raw like rows of a user, most recent first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Like>, sqlx::Error> {
        sqlx::query_as::<_, Like>(
            "SELECT id, user_id, product_id, created_at FROM liked_products \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Listings a user has liked, most recently liked first.
    pub async fn liked_listings(pool: &PgPool, user_id: DbId) -> Result<Vec<Listing>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            "SELECT p.id, p.user_id, p.title, p.description, p.category_id, p.condition, \
                    p.original_price, p.tags, p.images, p.wanted_category_id, \
                    p.wanted_condition, p.wanted_price_range, p.additional_notes, \
                    p.swap_preference, p.negotiable, p.location, p.status, p.is_available, \
                    p.created_at, p.updated_at \
             FROM liked_products l \
             JOIN products p ON p.id = l.product_id \
             WHERE l.user_id = $1 \
             ORDER BY l.created_at DESC, l.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
