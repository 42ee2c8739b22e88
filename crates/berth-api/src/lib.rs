//! berth-api: the HTTP surface of the placement advisor.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | POST | `/v1/events` | Handle a transport event, return its reply |
//! | GET | `/health` | Liveness probe |
//! | GET | `/stats` | Counter snapshot as JSON |
//! | GET | `/metrics` | Prometheus exposition |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use berth_events::EventRouter;
use berth_metrics::Counters;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub events: Arc<EventRouter>,
    pub counters: Arc<Counters>,
}

/// Build the complete router.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/v1/events", post(handlers::handle_event))
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        .route("/metrics", get(handlers::prometheus_metrics))
        .with_state(state)
}
