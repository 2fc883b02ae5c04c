//! Row types and DTOs, one module per table (or table family).

pub mod category;
pub mod engagement;
pub mod listing;
pub mod notification;
pub mod offer;
pub mod swap;
pub mod user;
