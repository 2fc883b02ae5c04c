//! Repository for the `recent_views` table.

use sqlx::PgPool;
use swapshop_core::types::DbId;

use crate::models::engagement::RecentView;

/// Column list for `recent_views` queries.
const COLUMNS: &str = "id, user_id, product_id, viewed_at";

/// Tracks which listings a user looked at last.
pub struct RecentViewRepo;

impl RecentViewRepo {
    /// Record a view. A repeat view of the same listing refreshes `viewed_at`.
    pub async fn record(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
    ) -> Result<RecentView, sqlx::Error> {
        let query = format!(
            "INSERT INTO recent_views (user_id, product_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id, product_id) DO UPDATE SET viewed_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecentView>(&query)
            .bind(user_id)
            .bind(product_id)
            .fetch_one(pool)
            .await
    }

    /// Most recent views of a user. `limit` must already be clamped.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<RecentView>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recent_views \
             WHERE user_id = $1 \
             ORDER BY viewed_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, RecentView>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Forget one viewed listing.
    pub async fn delete(pool: &PgPool, user_id: DbId, product_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM recent_views WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
