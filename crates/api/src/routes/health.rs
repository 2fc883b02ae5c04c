use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthReport {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Live consumers of market events. Zero means notifications are
    /// currently not being written.
    pub event_subscribers: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = match swapshop_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        event_subscribers: state.event_bus.subscriber_count(),
    })
}

/// `GET /health`, mounted at the root next to `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
