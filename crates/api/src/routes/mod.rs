pub mod auth;
pub mod categories;
pub mod health;
pub mod listings;
pub mod notification;
pub mod offers;
pub mod swaps;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/login                                      login (public)
///
/// /users/me                                        get, update profile
/// /users/me/onboarding                             complete onboarding (PUT)
/// /users/me/listings                               own listings
/// /users/me/offers/sent                            offers made
/// /users/me/offers/received                        offers on own listings
/// /users/me/swaps                                  swaps as owner or buyer
/// /users/me/likes                                  liked listings
/// /users/me/recent-views                           recently viewed
/// /users/me/recent-views/{product_id}              forget a view (DELETE)
/// /users/{id}                                      public profile
///
/// /categories                                      list, create
/// /categories/{id}                                 get, update, delete
/// /categories/{id}/listings                        available listings
///
/// /listings                                        browse (?category_id, q, limit, offset), create
/// /listings/{id}                                   get, update, delete
/// /listings/{id}/offers                            make offer (POST), list (owner)
/// /listings/{id}/swaps                             swaps of a listing (owner)
/// /listings/{id}/like                              like (POST), unlike (DELETE)
///
/// /offers/{id}                                     get, change status (PUT)
/// /offers/{id}/withdraw                            withdraw (POST, buyer)
///
/// /swaps                                           create (POST)
/// /swaps/{id}                                      details
/// /swaps/{id}/confirm                              confirm (POST)
/// /swaps/{id}/complete                             complete (POST)
///
/// /notifications                                   list (?unread_only, limit, offset)
/// /notifications/read-all                          mark all read (POST)
/// /notifications/unread-count                      unread count (GET)
/// /notifications/{id}/read                         mark read (POST)
/// /notifications/{id}                              delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/categories", categories::router())
        .nest("/listings", listings::router())
        .nest("/offers", offers::router())
        .nest("/swaps", swaps::router())
        .nest("/notifications", notification::router())
}
