//! Repository for the `offers` table.

use sqlx::PgPool;
use swapshop_core::offer::OfferStatus;
use swapshop_core::types::DbId;

use crate::models::offer::{CreateOffer, Offer};

/// Column list for the `offers` table.
const COLUMNS: &str = "id, product_id, buyer_id, seller_id, offered_item_title, \
    offered_item_description, offered_item_condition, offered_item_images, message, \
    status, created_at, updated_at";

/// Provides persistence for offers. Status changes are only ever issued
/// from inside a transaction owned by the negotiation engine.
pub struct OfferRepo;

impl OfferRepo {
    /// Find an offer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offers WHERE id = $1");
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Offers made by a buyer, most recent first.
    pub async fn list_sent(pool: &PgPool, buyer_id: DbId) -> Result<Vec<Offer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offers \
             WHERE buyer_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(buyer_id)
            .fetch_all(pool)
            .await
    }

    /// Offers received on listings owned by `seller_id`, most recent first.
    pub async fn list_received(pool: &PgPool, seller_id: DbId) -> Result<Vec<Offer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offers \
             WHERE seller_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(seller_id)
            .fetch_all(pool)
            .await
    }

    /// All offers on one listing, most recent first.
    pub async fn list_for_listing(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<Offer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offers \
             WHERE product_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Transaction-scoped operations
    // -----------------------------------------------------------------------

    /// Insert a new `pending` offer.
    ///
    /// `seller_id` is the listing owner at this instant. A racing duplicate
    /// violates `uq_offers_pending_buyer_product`.
    pub async fn create_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: DbId,
        buyer_id: DbId,
        seller_id: DbId,
        input: &CreateOffer,
    ) -> Result<Offer, sqlx::Error> {
        let query = format!(
            "INSERT INTO offers \
                (product_id, buyer_id, seller_id, offered_item_title, \
                 offered_item_description, offered_item_condition, offered_item_images, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(product_id)
            .bind(buyer_id)
            .bind(seller_id)
            .bind(input.offered_item_title.trim())
            .bind(&input.offered_item_description)
            .bind(&input.offered_item_condition)
            .bind(&input.offered_item_images)
            .bind(&input.message)
            .fetch_one(&mut **tx)
            .await
    }

    /// The buyer's pending offer on a listing, if any.
    pub async fn find_pending_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        buyer_id: DbId,
        product_id: DbId,
    ) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offers \
             WHERE buyer_id = $1 AND product_id = $2 AND status = $3"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(buyer_id)
            .bind(product_id)
            .bind(OfferStatus::Pending)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Load an offer and hold a row lock on it until the transaction ends.
    pub async fn lock_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offers WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Write a new status. The caller has already validated the transition.
    pub async fn set_status_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        status: OfferStatus,
    ) -> Result<Offer, sqlx::Error> {
        let query = format!("UPDATE offers SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }

    /// Reject every other pending offer on the listing.
    ///
    /// Returns the rejected offers so the caller can notify their buyers.
    pub async fn reject_pending_siblings_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: DbId,
        accepted_offer_id: DbId,
    ) -> Result<Vec<Offer>, sqlx::Error> {
        let query = format!(
            "UPDATE offers SET status = $3 \
             WHERE product_id = $1 AND id <> $2 AND status = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(product_id)
            .bind(accepted_offer_id)
            .bind(OfferStatus::Rejected)
            .bind(OfferStatus::Pending)
            .fetch_all(&mut **tx)
            .await
    }
}
