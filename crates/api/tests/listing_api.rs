//! HTTP-level tests for listings, wanted items and account endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_category, create_listing, delete_auth, get, get_auth,
    post_json, post_json_auth, put_json_auth, register,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_login_and_onboarding(pool: PgPool) {
    let app = build_test_app(pool);
    let (user_id, token) = register(&app, "ada").await;

    let json = body_json(get_auth(app.clone(), "/api/v1/users/me", &token).await).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["onboard"], false);
    assert!(json["data"].get("password_hash").is_none());

    let response = put_json_auth(
        app.clone(),
        "/api/v1/users/me/onboarding",
        &token,
        json!({
            "fullname": "Ada Lovelace",
            "email": "ada@example.com",
            "latitude": 51.5,
            "longitude": -0.12,
            "profile_image": "ada.png",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["onboard"], true);
    assert_eq!(
        json["data"]["profile_image_url"],
        "http://media.test/uploads/ada.png"
    );

    let response = put_json_auth(
        app.clone(),
        "/api/v1/users/me",
        &token,
        json!({ "bio": "Trades bikes" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["bio"], "Trades bikes");
    assert_eq!(json["data"]["fullname"], "Ada Lovelace");

    let response = get(app.clone(), &format!("/api/v1/users/{user_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_rules(pool: PgPool) {
    let app = build_test_app(pool);
    register(&app, "taken").await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "username": "taken", "password": "another-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "username": "shorty", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "taken", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn onboarding_requires_valid_email(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token) = register(&app, "ada").await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/users/me/onboarding",
        &token,
        json!({ "fullname": "Ada", "email": "nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_listing_with_wanted_items(pool: PgPool) {
    let app = build_test_app(pool);
    let (owner_id, owner) = register(&app, "owner").await;
    let category = create_category(&app, &owner, "Bikes").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/listings",
        &owner,
        json!({
            "title": "Road bike",
            "category_id": category,
            "original_price": 350.0,
            "tags": ["Vintage", "bike", "vintage"],
            "images": ["a.jpg", "b.jpg"],
            "wanted_items": [
                { "item_name": "Tent" },
                { "item_name": "Kayak", "description": "Two-seater" },
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["user_id"], owner_id);
    assert_eq!(data["status"], "active");
    assert_eq!(data["is_available"], true);
    assert_eq!(data["swap_preference"], "both");
    assert_eq!(data["tags"], json!(["bike", "vintage"]));
    assert_eq!(
        data["image_urls"],
        json!(["http://media.test/uploads/a.jpg", "http://media.test/uploads/b.jpg"])
    );
    assert_eq!(data["wanted_items"][0]["item_name"], "Tent");
    assert_eq!(data["wanted_items"][0]["priority"], 1);
    assert_eq!(data["wanted_items"][1]["priority"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_listing_validation(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, owner) = register(&app, "owner").await;
    let category = create_category(&app, &owner, "Bikes").await;

    let cases = [
        json!({ "title": " ", "category_id": category }),
        json!({ "title": "Bike", "category_id": 999999 }),
        json!({ "title": "Bike", "category_id": category, "wanted_category_id": 999999 }),
        json!({ "title": "Bike", "category_id": category, "original_price": -5.0 }),
        json!({ "title": "Bike", "category_id": category, "wanted_items": [{ "item_name": "" }] }),
    ];
    for body in cases {
        let response = post_json_auth(app.clone(), "/api/v1/listings", &owner, body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
    }

    let response = post_json(
        app.clone(),
        "/api/v1/listings",
        json!({ "title": "Bike", "category_id": category }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_wanted_items_and_is_owner_only(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, owner) = register(&app, "owner").await;
    let (_, intruder) = register(&app, "intruder").await;
    let category = create_category(&app, &owner, "Bikes").await;
    let listing = create_listing(&app, &owner, category, "Road bike").await;
    let uri = format!("/api/v1/listings/{listing}");

    let response = put_json_auth(app.clone(), &uri, &intruder, json!({ "title": "Mine now" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app.clone(),
        &uri,
        &owner,
        json!({
            "title": "Gravel bike",
            "wanted_items": [{ "item_name": "Canoe" }],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Gravel bike");
    assert_eq!(json["data"]["condition"], "good");
    let wanted = json["data"]["wanted_items"].as_array().unwrap();
    assert_eq!(wanted.len(), 1);
    assert_eq!(wanted[0]["item_name"], "Canoe");
    assert_eq!(wanted[0]["priority"], 1);

    // Omitting wanted_items keeps the current list.
    let json = body_json(put_json_auth(app.clone(), &uri, &owner, json!({ "negotiable": false })).await).await;
    assert_eq!(json["data"]["wanted_items"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["negotiable"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_listing_is_owner_only(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, owner) = register(&app, "owner").await;
    let (_, intruder) = register(&app, "intruder").await;
    let category = create_category(&app, &owner, "Bikes").await;
    let listing = create_listing(&app, &owner, category, "Road bike").await;
    let uri = format!("/api/v1/listings/{listing}");

    assert_eq!(delete_auth(app.clone(), &uri, &intruder).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(delete_auth(app.clone(), &uri, &owner).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete_auth(app.clone(), &uri, &owner).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn browse_filters_and_paginates(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, owner) = register(&app, "owner").await;
    let bikes = create_category(&app, &owner, "Bikes").await;
    let books = create_category(&app, &owner, "Books").await;
    create_listing(&app, &owner, bikes, "Road bike").await;
    create_listing(&app, &owner, bikes, "Mountain bike").await;
    create_listing(&app, &owner, books, "Cook book").await;

    let json = body_json(get(app.clone(), "/api/v1/listings").await).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Cook book", "Mountain bike", "Road bike"]);

    let json = body_json(get(app.clone(), &format!("/api/v1/listings?category_id={bikes}")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app.clone(), "/api/v1/listings?q=BIKE&limit=1").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Mountain bike");

    let json = body_json(get(app.clone(), "/api/v1/listings?q=bike&offset=1").await).await;
    assert_eq!(json["data"][0]["title"], "Road bike");

    let json =
        body_json(get(app.clone(), &format!("/api/v1/categories/{books}/listings")).await).await;
    assert_eq!(json["data"][0]["title"], "Cook book");

    let json = body_json(get_auth(app.clone(), "/api/v1/users/me/listings", &owner).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}
