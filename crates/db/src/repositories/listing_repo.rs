//! Repository for the `products` and `wanted_items` tables.

use sqlx::PgPool;
use swapshop_core::listing::{priority_for_index, ListingStatus};
use swapshop_core::types::DbId;

use crate::models::listing::{
    CreateListing, Listing, ListingFilter, ListingWithWanted, UpdateListing, WantedItem,
    WantedItemInput,
};

/// Column list for the `products` table.
const COLUMNS: &str = "id, user_id, title, description, category_id, condition, original_price, \
    tags, images, wanted_category_id, wanted_condition, wanted_price_range, additional_notes, \
    swap_preference, negotiable, location, status, is_available, created_at, updated_at";

/// Column list for the `wanted_items` table.
const WANTED_COLUMNS: &str = "id, product_id, item_name, description, priority, created_at";

/// Provides CRUD operations for listings and their wanted items.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a listing and its wanted items in one transaction.
    ///
    /// New listings start `active` and available. `tags` must already be
    /// normalized by the caller.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateListing,
    ) -> Result<ListingWithWanted, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO products \
                (user_id, title, description, category_id, condition, original_price, tags, \
                 images, wanted_category_id, wanted_condition, wanted_price_range, \
                 additional_notes, swap_preference, negotiable, location) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                     COALESCE($14, true), $15) \
             RETURNING {COLUMNS}"
        );
        let listing = sqlx::query_as::<_, Listing>(&insert_query)
            .bind(owner_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.condition)
            .bind(input.original_price)
            .bind(&input.tags)
            .bind(&input.images)
            .bind(input.wanted_category_id)
            .bind(&input.wanted_condition)
            .bind(&input.wanted_price_range)
            .bind(&input.additional_notes)
            .bind(input.swap_preference.unwrap_or_default())
            .bind(input.negotiable)
            .bind(&input.location)
            .fetch_one(&mut *tx)
            .await?;

        let wanted_items =
            Self::set_wanted_items_inner(&mut tx, listing.id, &input.wanted_items).await?;

        tx.commit().await?;
        Ok(ListingWithWanted {
            listing,
            wanted_items,
        })
    }

    /// Find a listing by ID regardless of availability.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a listing by ID, enriched with its wanted items.
    pub async fn find_with_wanted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ListingWithWanted>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(listing) => {
                let wanted_items = Self::wanted_items_for(pool, listing.id).await?;
                Ok(Some(ListingWithWanted {
                    listing,
                    wanted_items,
                }))
            }
            None => Ok(None),
        }
    }

    /// Public browse: available listings only, newest first.
    pub async fn browse(pool: &PgPool, filter: &ListingFilter) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE is_available = true \
               AND ($1::BIGINT IS NULL OR category_id = $1) \
               AND ($2::TEXT IS NULL OR title ILIKE $2 OR description ILIKE $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(filter.category_id)
            .bind(&filter.pattern)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// All listings of one owner, including unavailable ones, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a listing. Only non-`None` fields are applied.
    ///
    /// If `wanted_items` is `Some`, replaces the whole wanted-item list in
    /// the same transaction. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<ListingWithWanted>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE products SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                category_id = COALESCE($4, category_id), \
                condition = COALESCE($5, condition), \
                original_price = COALESCE($6, original_price), \
                tags = COALESCE($7, tags), \
                images = COALESCE($8, images), \
                wanted_category_id = COALESCE($9, wanted_category_id), \
                wanted_condition = COALESCE($10, wanted_condition), \
                wanted_price_range = COALESCE($11, wanted_price_range), \
                additional_notes = COALESCE($12, additional_notes), \
                swap_preference = COALESCE($13, swap_preference), \
                negotiable = COALESCE($14, negotiable), \
                location = COALESCE($15, location) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let listing = sqlx::query_as::<_, Listing>(&update_query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.condition)
            .bind(input.original_price)
            .bind(&input.tags)
            .bind(&input.images)
            .bind(input.wanted_category_id)
            .bind(&input.wanted_condition)
            .bind(&input.wanted_price_range)
            .bind(&input.additional_notes)
            .bind(input.swap_preference)
            .bind(input.negotiable)
            .bind(&input.location)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(listing) = listing else {
            tx.rollback().await?;
            return Ok(None);
        };

        let wanted_items = match input.wanted_items {
            Some(ref items) => Self::set_wanted_items_inner(&mut tx, listing.id, items).await?,
            None => Self::wanted_items_in_tx(&mut tx, listing.id).await?,
        };

        tx.commit().await?;
        Ok(Some(ListingWithWanted {
            listing,
            wanted_items,
        }))
    }

    /// Hard-delete a listing. Wanted items, offers, swaps, likes and views
    /// go with it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Wanted items of a listing, ordered by priority.
    pub async fn wanted_items_for(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<WantedItem>, sqlx::Error> {
        let query = format!(
            "SELECT {WANTED_COLUMNS} FROM wanted_items \
             WHERE product_id = $1 \
             ORDER BY priority"
        );
        sqlx::query_as::<_, WantedItem>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Transaction-scoped operations
    // -----------------------------------------------------------------------

    /// Load a listing and hold a row lock on it until the transaction ends.
    pub async fn lock_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Set the negotiation status of a listing.
    pub async fn set_status_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        status: ListingStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE products SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Withdraw a listing from the market after its swap completed.
    pub async fn mark_swapped_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE products SET is_available = false, status = $2 WHERE id = $1")
            .bind(id)
            .bind(ListingStatus::Swapped)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn wanted_items_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: DbId,
    ) -> Result<Vec<WantedItem>, sqlx::Error> {
        let query = format!(
            "SELECT {WANTED_COLUMNS} FROM wanted_items \
             WHERE product_id = $1 \
             ORDER BY priority"
        );
        sqlx::query_as::<_, WantedItem>(&query)
            .bind(product_id)
            .fetch_all(&mut **tx)
            .await
    }

    /// Replace the wanted items of a listing within an existing transaction.
    ///
    /// Deletes the current set, then inserts the new one with priorities
    /// taken from the array position.
    async fn set_wanted_items_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: DbId,
        items: &[WantedItemInput],
    ) -> Result<Vec<WantedItem>, sqlx::Error> {
        sqlx::query("DELETE FROM wanted_items WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO wanted_items (product_id, item_name, description, priority) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {WANTED_COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let row = sqlx::query_as::<_, WantedItem>(&insert_query)
                .bind(product_id)
                .bind(item.item_name.trim())
                .bind(&item.description)
                .bind(priority_for_index(index))
                .fetch_one(&mut **tx)
                .await?;
            inserted.push(row);
        }

        Ok(inserted)
    }
}
