//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use sqlx::PgPool;
use swapshop_db::models::category::CreateCategory;
use swapshop_db::models::listing::{CreateListing, WantedItemInput};
use swapshop_db::models::offer::CreateOffer;
use swapshop_db::models::user::CreateUser;
use swapshop_db::repositories::{CategoryRepo, UserRepo};

pub async fn user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn category(pool: &PgPool, name: &str) -> i64 {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: name.to_string(),
            description: None,
            icon: None,
        },
    )
    .await
    .unwrap()
    .id
}

pub fn wanted(name: &str) -> WantedItemInput {
    WantedItemInput {
        item_name: name.to_string(),
        description: None,
    }
}

pub fn new_listing(category_id: i64, title: &str) -> CreateListing {
    CreateListing {
        title: title.to_string(),
        description: Some(format!("{title} in good shape")),
        category_id,
        condition: Some("good".to_string()),
        original_price: Some(120.0),
        tags: vec![],
        images: vec!["front.jpg".to_string()],
        wanted_category_id: None,
        wanted_condition: None,
        wanted_price_range: None,
        additional_notes: None,
        swap_preference: None,
        negotiable: None,
        location: None,
        wanted_items: vec![],
    }
}

pub fn new_offer(title: &str) -> CreateOffer {
    CreateOffer {
        offered_item_title: title.to_string(),
        offered_item_description: None,
        offered_item_condition: Some("like new".to_string()),
        offered_item_images: vec![],
        message: Some("Interested?".to_string()),
    }
}
