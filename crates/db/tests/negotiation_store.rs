//! Integration tests for the offer and swap repositories.
//!
//! - The partial unique index allows one pending offer per buyer and listing
//! - Sibling rejection only touches other pending offers on the same listing
//! - Swap creation is idempotent per offer
//! - `find_by_user` returns swaps for both sides
//! - The details join tolerates deleted users

mod common;

use sqlx::PgPool;
use swapshop_core::offer::OfferStatus;
use swapshop_db::repositories::{
    LikeRepo, ListingRepo, NotificationRepo, OfferRepo, RecentViewRepo, SwapRepo,
};

async fn place_offer(pool: &PgPool, listing_id: i64, buyer: i64, seller: i64, title: &str) -> i64 {
    let mut tx = pool.begin().await.unwrap();
    let offer = OfferRepo::create_in_tx(&mut tx, listing_id, buyer, seller, &common::new_offer(title))
        .await
        .unwrap();
    tx.commit().await.unwrap();
    offer.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_pending_offer_violates_partial_index(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let buyer = common::user(&pool, "buyer").await;
    let cat = common::category(&pool, "Bikes").await;
    let listing = ListingRepo::create(&pool, owner, &common::new_listing(cat, "Road bike"))
        .await
        .unwrap()
        .listing;

    let first = place_offer(&pool, listing.id, buyer, owner, "Guitar").await;

    let mut tx = pool.begin().await.unwrap();
    let err = OfferRepo::create_in_tx(&mut tx, listing.id, buyer, owner, &common::new_offer("Amp"))
        .await
        .unwrap_err();
    let constraint = err.as_database_error().and_then(|e| e.constraint());
    assert_eq!(constraint, Some("uq_offers_pending_buyer_product"));
    drop(tx);

    // Once the first offer leaves `pending`, a new one is allowed.
    let mut tx = pool.begin().await.unwrap();
    OfferRepo::set_status_in_tx(&mut tx, first, OfferStatus::Cancelled)
        .await
        .unwrap();
    let second = OfferRepo::create_in_tx(&mut tx, listing.id, buyer, owner, &common::new_offer("Amp"))
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert_eq!(second.status, OfferStatus::Pending);
    assert_eq!(second.seller_id, owner);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_siblings_leaves_other_listings_alone(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let b1 = common::user(&pool, "b1").await;
    let b2 = common::user(&pool, "b2").await;
    let b3 = common::user(&pool, "b3").await;
    let cat = common::category(&pool, "Bikes").await;
    let l1 = ListingRepo::create(&pool, owner, &common::new_listing(cat, "Road bike"))
        .await
        .unwrap()
        .listing;
    let l2 = ListingRepo::create(&pool, owner, &common::new_listing(cat, "Helmet"))
        .await
        .unwrap()
        .listing;

    let accepted = place_offer(&pool, l1.id, b1, owner, "Guitar").await;
    let sibling = place_offer(&pool, l1.id, b2, owner, "Camera").await;
    let elsewhere = place_offer(&pool, l2.id, b3, owner, "Drone").await;

    let mut tx = pool.begin().await.unwrap();
    OfferRepo::set_status_in_tx(&mut tx, accepted, OfferStatus::Accepted)
        .await
        .unwrap();
    let rejected = OfferRepo::reject_pending_siblings_in_tx(&mut tx, l1.id, accepted)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].id, sibling);
    assert_eq!(rejected[0].buyer_id, b2);

    let status = |id| {
        let pool = pool.clone();
        async move { OfferRepo::find_by_id(&pool, id).await.unwrap().unwrap().status }
    };
    assert_eq!(status(accepted).await, OfferStatus::Accepted);
    assert_eq!(status(sibling).await, OfferStatus::Rejected);
    assert_eq!(status(elsewhere).await, OfferStatus::Pending);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn swap_creation_is_idempotent(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let buyer = common::user(&pool, "buyer").await;
    let cat = common::category(&pool, "Bikes").await;
    let listing = ListingRepo::create(&pool, owner, &common::new_listing(cat, "Road bike"))
        .await
        .unwrap()
        .listing;
    let offer = place_offer(&pool, listing.id, buyer, owner, "Guitar").await;

    let mut tx = pool.begin().await.unwrap();
    let first = SwapRepo::create_or_get_in_tx(&mut tx, listing.id, offer)
        .await
        .unwrap();
    let again = SwapRepo::create_or_get_in_tx(&mut tx, listing.id, offer)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(first.id, again.id);
    assert!(!first.swaped);
    assert_eq!(SwapRepo::find_by_listing(&pool, listing.id).await.unwrap().len(), 1);

    let found = SwapRepo::find_by_offer(&pool, offer).await.unwrap().unwrap();
    assert_eq!(found.id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn swaps_are_visible_to_both_parties(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let buyer = common::user(&pool, "buyer").await;
    let stranger = common::user(&pool, "stranger").await;
    let cat = common::category(&pool, "Bikes").await;
    let listing = ListingRepo::create(&pool, owner, &common::new_listing(cat, "Road bike"))
        .await
        .unwrap()
        .listing;
    let offer = place_offer(&pool, listing.id, buyer, owner, "Guitar").await;

    let mut tx = pool.begin().await.unwrap();
    let swap = SwapRepo::create_or_get_in_tx(&mut tx, listing.id, offer)
        .await
        .unwrap();
    SwapRepo::mark_completed_in_tx(&mut tx, swap.id).await.unwrap();
    tx.commit().await.unwrap();

    let for_owner = SwapRepo::find_by_user(&pool, owner).await.unwrap();
    let for_buyer = SwapRepo::find_by_user(&pool, buyer).await.unwrap();
    assert_eq!(for_owner.len(), 1);
    assert_eq!(for_buyer.len(), 1);
    assert!(for_owner[0].swaped);
    assert!(SwapRepo::find_by_user(&pool, stranger).await.unwrap().is_empty());

    let confirmed = SwapRepo::confirm(&pool, swap.id, false).await.unwrap().unwrap();
    assert!(confirmed.buyer_accepted);
    assert!(!confirmed.user_accepted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn swap_details_join_fills_both_parties(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let buyer = common::user(&pool, "buyer").await;
    let cat = common::category(&pool, "Bikes").await;
    let listing = ListingRepo::create(&pool, owner, &common::new_listing(cat, "Road bike"))
        .await
        .unwrap()
        .listing;
    let offer = place_offer(&pool, listing.id, buyer, owner, "Guitar").await;

    let mut tx = pool.begin().await.unwrap();
    let swap = SwapRepo::create_or_get_in_tx(&mut tx, listing.id, offer)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let row = SwapRepo::find_details(&pool, swap.id).await.unwrap().unwrap();
    assert_eq!(row.product_title.as_deref(), Some("Road bike"));
    assert_eq!(row.offered_item_title.as_deref(), Some("Guitar"));
    assert_eq!(row.owner_username.as_deref(), Some("owner"));
    assert_eq!(row.buyer_username.as_deref(), Some("buyer"));
    assert_eq!(row.offer_status, Some(OfferStatus::Pending));

    assert!(SwapRepo::find_details(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn likes_and_views_are_upserts(pool: PgPool) {
    let owner = common::user(&pool, "owner").await;
    let viewer = common::user(&pool, "viewer").await;
    let cat = common::category(&pool, "Bikes").await;
    let listing = ListingRepo::create(&pool, owner, &common::new_listing(cat, "Road bike"))
        .await
        .unwrap()
        .listing;

    assert!(LikeRepo::like(&pool, viewer, listing.id).await.unwrap());
    assert!(!LikeRepo::like(&pool, viewer, listing.id).await.unwrap());
    assert_eq!(LikeRepo::liked_listings(&pool, viewer).await.unwrap().len(), 1);
    assert!(LikeRepo::unlike(&pool, viewer, listing.id).await.unwrap());
    assert!(LikeRepo::list_for_user(&pool, viewer).await.unwrap().is_empty());

    let first = RecentViewRepo::record(&pool, viewer, listing.id).await.unwrap();
    let second = RecentViewRepo::record(&pool, viewer, listing.id).await.unwrap();
    assert_eq!(first.id, second.id);
    assert!(second.viewed_at >= first.viewed_at);
    assert_eq!(RecentViewRepo::list_for_user(&pool, viewer, 10).await.unwrap().len(), 1);
    assert!(RecentViewRepo::delete(&pool, viewer, listing.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notifications_read_lifecycle(pool: PgPool) {
    use swapshop_core::notification;
    use swapshop_db::models::notification::CreateNotification;

    let user = common::user(&pool, "user").await;
    for title in ["Bike", "Lamp"] {
        NotificationRepo::create(
            &pool,
            &CreateNotification {
                user_id: user,
                content: notification::offer_rejected(title),
            },
        )
        .await
        .unwrap();
    }

    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 2);
    let listed = NotificationRepo::list_for_user(&pool, user, true, 20, 0).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].kind, notification::TYPE_OFFER);

    assert!(NotificationRepo::mark_read(&pool, listed[0].id, user).await.unwrap());
    assert!(!NotificationRepo::mark_read(&pool, listed[0].id, user).await.unwrap());
    assert_eq!(NotificationRepo::mark_all_read(&pool, user).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 0);

    assert!(NotificationRepo::delete(&pool, listed[1].id, user).await.unwrap());
    assert_eq!(
        NotificationRepo::list_for_user(&pool, user, false, 20, 0).await.unwrap().len(),
        1
    );
}
