//! Shared query parameter types for API handlers.

use serde::Deserialize;
use swapshop_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped with `swapshop_core::search::{clamp_limit, clamp_offset}`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /listings`.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    pub category_id: Option<DbId>,
    /// Case-insensitive substring matched against title and description.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /notifications`.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications.
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
