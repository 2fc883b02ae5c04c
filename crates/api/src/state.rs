use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: swapshop_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event bus for post-commit marketplace events.
    pub event_bus: Arc<swapshop_events::EventBus>,
}

impl AppState {
    /// Base URL for resolving stored image file names.
    pub fn media_base(&self) -> &str {
        &self.config.media_base_url
    }
}
