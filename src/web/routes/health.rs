//! Health Routes
//!
//! Health check endpoints for monitoring probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (dataset loaded)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::web::dto::HealthResponse;
use crate::web::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the dataset is loaded, 503 if loading failed.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with dataset details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (records, states) = state
        .dataset()
        .map(|d| (d.len(), d.state_names().len()))
        .unwrap_or((0, 0));

    let ready = state.is_ready();

    Json(HealthResponse {
        status: if ready { "healthy" } else { "unhealthy" }.to_string(),
        dataset: if ready { "ok" } else { "error" }.to_string(),
        records,
        states,
        error: state.load_error().map(str::to_string),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
