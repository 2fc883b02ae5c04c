//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that must take part in
//! a caller-owned transaction take `&mut sqlx::Transaction<'_, Postgres>`
//! instead and carry an `_in_tx` suffix.

pub mod category_repo;
pub mod like_repo;
pub mod listing_repo;
pub mod notification_repo;
pub mod offer_repo;
pub mod recent_view_repo;
pub mod swap_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use like_repo::LikeRepo;
pub use listing_repo::ListingRepo;
pub use notification_repo::NotificationRepo;
pub use offer_repo::OfferRepo;
pub use recent_view_repo::RecentViewRepo;
pub use swap_repo::SwapRepo;
pub use user_repo::UserRepo;
