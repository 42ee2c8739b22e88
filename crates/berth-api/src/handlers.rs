//! HTTP handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use berth_events::{Event, EventError};
use berth_metrics::CountersSnapshot;
use tracing::warn;

use crate::ApiState;

/// Failure body for rejected events.
#[derive(serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: msg.to_string(),
        }),
    )
}

/// POST /v1/events
///
/// Decodes one transport event and returns its reply. A rejected event
/// is still acknowledged with a failure body so the transport can
/// signal the error upstream.
pub async fn handle_event(
    State(state): State<ApiState>,
    Json(event): Json<Event>,
) -> impl IntoResponse {
    match state.events.dispatch(event).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err @ EventError::UnhandledEvent(_)) => {
            warn!(error = %err, "dropping event");
            error_response(&err.to_string(), StatusCode::NOT_FOUND).into_response()
        }
        Err(err) => {
            warn!(error = %err, "rejecting event");
            error_response(&err.to_string(), StatusCode::BAD_REQUEST).into_response()
        }
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// GET /stats
pub async fn stats(State(state): State<ApiState>) -> Json<CountersSnapshot> {
    Json(state.counters.snapshot())
}

/// GET /metrics
pub async fn prometheus_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let body = berth_metrics::render_prometheus(&state.counters.snapshot());
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
