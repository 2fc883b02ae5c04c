//! Notification entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use swapshop_core::notification::NotificationContent;
use swapshop_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub details: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: Option<String>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a notification for one recipient.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub content: NotificationContent,
}
