//! Swapshop domain core.
//!
//! Pure, I/O-free building blocks shared by the database and API layers:
//! id/timestamp aliases, the [`error::CoreError`] taxonomy, and the
//! negotiation rules for listings, offers, and swaps.

pub mod error;
pub mod listing;
pub mod media;
pub mod notification;
pub mod offer;
pub mod search;
pub mod swap;
pub mod types;
pub mod user;
