//! Swapshop event bus and notification delivery.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`MarketEvent`] -- the envelope published after a marketplace write
//!   commits.
//! - [`NotificationWriter`] -- background service that turns events into
//!   rows in the `notifications` table.

pub mod bus;
pub mod notifier;

pub use bus::{EventBus, MarketEvent};
pub use notifier::NotificationWriter;
