//! Notification delivery service.
//!
//! [`NotificationWriter`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and writes one `notifications` row per addressed [`MarketEvent`]. It runs
//! as a long-lived background task and exits when the bus is dropped.
//! Failures are logged and swallowed; notifications are advisory.

use swapshop_core::notification::{self, NotificationContent};
use swapshop_db::models::notification::CreateNotification;
use swapshop_db::repositories::NotificationRepo;
use swapshop_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::{
    MarketEvent, LISTING_LIKED, LISTING_VIEWED, OFFER_ACCEPTED, OFFER_CANCELLED, OFFER_CREATED,
    OFFER_REJECTED, OFFER_WITHDRAWN, SWAP_COMPLETED,
};

/// Background service that persists user notifications.
pub struct NotificationWriter;

impl NotificationWriter {
    /// Run the delivery loop until the channel is closed.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<MarketEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let Some(input) = Self::render(&event) else {
                        continue;
                    };
                    if let Err(e) = NotificationRepo::create(&pool, &input).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            user_id = event.recipient_user_id,
                            "Failed to write notification"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Notification writer lagged, some notifications were dropped"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification writer shutting down");
                    break;
                }
            }
        }
    }

    /// Turn an event into a notification row.
    ///
    /// Returns `None` for unknown event types and for events whose actor is
    /// also the recipient.
    pub fn render(event: &MarketEvent) -> Option<CreateNotification> {
        if event.is_self_addressed() {
            return None;
        }
        let title = event.payload_str("listing_title");
        let actor = event.payload_str("actor_name");

        let content: NotificationContent = match event.event_type.as_str() {
            OFFER_CREATED => {
                notification::offer_received(title, actor, event.payload_str("offered_item"))
            }
            OFFER_ACCEPTED => notification::offer_accepted(title),
            OFFER_REJECTED => notification::offer_rejected(title),
            OFFER_CANCELLED => notification::offer_cancelled(title),
            OFFER_WITHDRAWN => notification::offer_withdrawn(title, actor),
            SWAP_COMPLETED => notification::swap_completed(title),
            LISTING_LIKED => notification::listing_liked(title, actor),
            LISTING_VIEWED => notification::listing_viewed(title, actor),
            other => {
                tracing::debug!(event_type = other, "No notification for event type");
                return None;
            }
        };

        Some(CreateNotification {
            user_id: event.recipient_user_id,
            content,
        })
    }
}
