//! HTTP-level tests for likes, recent views and notifications.
//!
//! Notification tests run the real `NotificationWriter` against the test
//! database and poll until the asynchronous write lands.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, build_test_app, create_category, create_listing, delete_auth, get_auth,
    make_offer, post_auth, register,
};
use serde_json::Value;
use sqlx::PgPool;
use swapshop_events::NotificationWriter;

/// Poll `/notifications` until `expected` rows are present or give up.
async fn wait_for_notifications(app: &Router, token: &str, expected: usize) -> Vec<Value> {
    for _ in 0..50 {
        let json = body_json(get_auth(app.clone(), "/api/v1/notifications", token).await).await;
        let items = json["data"].as_array().cloned().unwrap_or_default();
        if items.len() >= expected {
            return items;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("expected {expected} notification(s)");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn likes_are_idempotent(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, owner) = register(&app, "owner").await;
    let (_, fan) = register(&app, "fan").await;
    let category = create_category(&app, &owner, "Bikes").await;
    let listing = create_listing(&app, &owner, category, "Road bike").await;
    let uri = format!("/api/v1/listings/{listing}/like");

    for _ in 0..2 {
        let response = post_auth(app.clone(), &uri, &fan).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["liked"], true);
    }

    let json = body_json(get_auth(app.clone(), "/api/v1/users/me/likes", &fan).await).await;
    let likes = json["data"].as_array().unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0]["id"], listing);

    assert_eq!(delete_auth(app.clone(), &uri, &fan).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(app.clone(), &uri, &fan).await.status(), StatusCode::NO_CONTENT);
    let json = body_json(get_auth(app.clone(), "/api/v1/users/me/likes", &fan).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let response = post_auth(app.clone(), "/api/v1/listings/999999/like", &fan).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn viewing_records_recent_views_for_non_owners(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, owner) = register(&app, "owner").await;
    let (_, visitor) = register(&app, "visitor").await;
    let category = create_category(&app, &owner, "Bikes").await;
    let first = create_listing(&app, &owner, category, "Road bike").await;
    let second = create_listing(&app, &owner, category, "Tandem").await;

    for id in [first, second, first] {
        let response = get_auth(app.clone(), &format!("/api/v1/listings/{id}"), &visitor).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    get_auth(app.clone(), &format!("/api/v1/listings/{first}"), &owner).await;

    let json =
        body_json(get_auth(app.clone(), "/api/v1/users/me/recent-views", &visitor).await).await;
    let views = json["data"].as_array().unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0]["product_id"], first);
    assert_eq!(views[1]["product_id"], second);

    let json =
        body_json(get_auth(app.clone(), "/api/v1/users/me/recent-views", &owner).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let json = body_json(
        get_auth(app.clone(), "/api/v1/users/me/recent-views?limit=1", &visitor).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/users/me/recent-views/{second}");
    assert_eq!(delete_auth(app.clone(), &uri, &visitor).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(app.clone(), &uri, &visitor).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn offer_notifications_reach_the_seller(pool: PgPool) {
    let (app, bus) = common::build_test_app_with_bus(pool.clone());
    tokio::spawn(NotificationWriter::run(pool, bus.subscribe()));

    let (_, owner) = register(&app, "owner").await;
    let (_, buyer) = register(&app, "buyer").await;
    let category = create_category(&app, &owner, "Bikes").await;
    let listing = create_listing(&app, &owner, category, "Road bike").await;
    make_offer(&app, &buyer, listing, "Tent").await;

    let items = wait_for_notifications(&app, &owner, 1).await;
    assert_eq!(items[0]["type"], "offer");
    assert_eq!(items[0]["is_read"], false);
    let message = items[0]["message"].as_str().unwrap();
    assert!(message.contains("buyer") && message.contains("Tent") && message.contains("Road bike"));

    // The buyer is never notified of their own offer.
    let json = body_json(get_auth(app.clone(), "/api/v1/notifications", &buyer).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let json =
        body_json(get_auth(app.clone(), "/api/v1/notifications/unread-count", &owner).await).await;
    assert_eq!(json["data"]["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notification_read_lifecycle(pool: PgPool) {
    let (app, bus) = common::build_test_app_with_bus(pool.clone());
    tokio::spawn(NotificationWriter::run(pool, bus.subscribe()));

    let (_, owner) = register(&app, "owner").await;
    let (_, fan) = register(&app, "fan").await;
    let (_, stranger) = register(&app, "stranger").await;
    let category = create_category(&app, &owner, "Bikes").await;
    let first = create_listing(&app, &owner, category, "Road bike").await;
    let second = create_listing(&app, &owner, category, "Tandem").await;
    post_auth(app.clone(), &format!("/api/v1/listings/{first}/like"), &fan).await;
    post_auth(app.clone(), &format!("/api/v1/listings/{second}/like"), &fan).await;

    let items = wait_for_notifications(&app, &owner, 2).await;
    let id = items[0]["id"].as_i64().unwrap();

    // Another user's notification is invisible to the stranger.
    let uri = format!("/api/v1/notifications/{id}/read");
    assert_eq!(post_auth(app.clone(), &uri, &stranger).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(post_auth(app.clone(), &uri, &owner).await.status(), StatusCode::NO_CONTENT);

    let json = body_json(
        get_auth(app.clone(), "/api/v1/notifications?unread_only=true", &owner).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json =
        body_json(post_auth(app.clone(), "/api/v1/notifications/read-all", &owner).await).await;
    assert_eq!(json["data"]["marked_read"], 1);

    let uri = format!("/api/v1/notifications/{id}");
    assert_eq!(delete_auth(app.clone(), &uri, &owner).await.status(), StatusCode::NO_CONTENT);
    let json =
        body_json(get_auth(app.clone(), "/api/v1/notifications/unread-count", &owner).await).await;
    assert_eq!(json["data"]["count"], 0);
    let json = body_json(get_auth(app.clone(), "/api/v1/notifications", &owner).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
