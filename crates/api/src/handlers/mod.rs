pub mod auth;
pub mod categories;
pub mod likes;
pub mod listings;
pub mod notification;
pub mod offers;
pub mod swaps;
pub mod users;
