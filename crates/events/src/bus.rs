//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`MarketEvent`]s. It is
//! shared via `Arc<EventBus>` across the application. Publishing never
//! blocks and never fails, so a missing or slow consumer cannot affect the
//! write that produced the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swapshop_core::types::DbId;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

pub const OFFER_CREATED: &str = "offer.created";
pub const OFFER_ACCEPTED: &str = "offer.accepted";
pub const OFFER_REJECTED: &str = "offer.rejected";
pub const OFFER_CANCELLED: &str = "offer.cancelled";
pub const OFFER_WITHDRAWN: &str = "offer.withdrawn";
pub const SWAP_COMPLETED: &str = "swap.completed";
pub const LISTING_LIKED: &str = "listing.liked";
pub const LISTING_VIEWED: &str = "listing.viewed";

// ---------------------------------------------------------------------------
// MarketEvent
// ---------------------------------------------------------------------------

/// Something that happened on the marketplace and may interest one user.
///
/// Constructed via [`MarketEvent::new`] and enriched with the builder
/// methods [`with_source`](MarketEvent::with_source),
/// [`with_actor`](MarketEvent::with_actor) and
/// [`with_payload`](MarketEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Dot-separated event name, e.g. `"offer.accepted"`.
    pub event_type: String,

    /// The user the event is addressed to.
    pub recipient_user_id: DbId,

    /// Optional source entity kind (`"offer"`, `"swap"`, `"listing"`).
    pub source_entity_type: Option<String>,

    /// Optional source entity database id.
    pub source_entity_id: Option<DbId>,

    /// Optional id of the user that triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Event-specific data used to render the notification text.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl MarketEvent {
    pub fn new(event_type: impl Into<String>, recipient_user_id: DbId) -> Self {
        Self {
            event_type: event_type.into(),
            recipient_user_id,
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach a source entity to the event.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Whether the actor would be notifying themself.
    pub fn is_self_addressed(&self) -> bool {
        self.actor_user_id == Some(self.recipient_user_id)
    }

    /// String field of the payload, or `""` when absent.
    pub fn payload_str(&self, key: &str) -> &str {
        self.payload
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use swapshop_events::bus::{EventBus, MarketEvent, OFFER_CREATED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(MarketEvent::new(OFFER_CREATED, 7));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<MarketEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: MarketEvent) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Publish a batch of events in order.
    pub fn publish_all(&self, events: impl IntoIterator<Item = MarketEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers, the notification writer included.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
