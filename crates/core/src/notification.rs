//! Notification kinds and the user-facing text for marketplace events.

/// Someone made, accepted, rejected or withdrew an offer.
pub const TYPE_OFFER: &str = "offer";
/// A swap finished.
pub const TYPE_SWAP: &str = "swap";
/// Someone liked a listing.
pub const TYPE_LIKE: &str = "like";
/// Someone viewed a listing.
pub const TYPE_VIEW: &str = "view";

/// Rendered notification, ready to be written to the `notifications` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
    pub kind: &'static str,
    pub icon: &'static str,
}

pub fn offer_received(listing_title: &str, buyer_name: &str, offered_item: &str) -> NotificationContent {
    NotificationContent {
        title: "New offer".to_string(),
        message: format!("{buyer_name} offered \"{offered_item}\" for your \"{listing_title}\""),
        details: None,
        kind: TYPE_OFFER,
        icon: "swap-horizontal",
    }
}

pub fn offer_accepted(listing_title: &str) -> NotificationContent {
    NotificationContent {
        title: "Offer accepted".to_string(),
        message: format!("Your offer for \"{listing_title}\" was accepted"),
        details: Some("Confirm the swap with the owner to complete it.".to_string()),
        kind: TYPE_OFFER,
        icon: "checkmark-circle",
    }
}

pub fn offer_rejected(listing_title: &str) -> NotificationContent {
    NotificationContent {
        title: "Offer declined".to_string(),
        message: format!("Your offer for \"{listing_title}\" was declined"),
        details: None,
        kind: TYPE_OFFER,
        icon: "close-circle",
    }
}

pub fn offer_cancelled(listing_title: &str) -> NotificationContent {
    NotificationContent {
        title: "Offer cancelled".to_string(),
        message: format!("Your offer for \"{listing_title}\" was cancelled by the owner"),
        details: None,
        kind: TYPE_OFFER,
        icon: "close-circle",
    }
}

pub fn offer_withdrawn(listing_title: &str, buyer_name: &str) -> NotificationContent {
    NotificationContent {
        title: "Offer withdrawn".to_string(),
        message: format!("{buyer_name} withdrew their offer for \"{listing_title}\""),
        details: None,
        kind: TYPE_OFFER,
        icon: "arrow-undo",
    }
}

pub fn swap_completed(listing_title: &str) -> NotificationContent {
    NotificationContent {
        title: "Swap completed".to_string(),
        message: format!("The swap for \"{listing_title}\" is complete"),
        details: None,
        kind: TYPE_SWAP,
        icon: "ribbon",
    }
}

pub fn listing_liked(listing_title: &str, liker_name: &str) -> NotificationContent {
    NotificationContent {
        title: "New like".to_string(),
        message: format!("{liker_name} liked your \"{listing_title}\""),
        details: None,
        kind: TYPE_LIKE,
        icon: "heart",
    }
}

pub fn listing_viewed(listing_title: &str, viewer_name: &str) -> NotificationContent {
    NotificationContent {
        title: "Listing viewed".to_string(),
        message: format!("{viewer_name} viewed your \"{listing_title}\""),
        details: None,
        kind: TYPE_VIEW,
        icon: "eye",
    }
}
