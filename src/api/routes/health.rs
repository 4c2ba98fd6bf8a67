//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use std::time::Duration;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::dashboard::ViewState;

/// How long the session lock may stay unavailable before the server is unready
const SESSION_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if the dashboard session answers within the timeout.
/// The market-data source is not probed: its outages surface as a
/// fetch-failure render, not as an unready server.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match check_session(&state).await {
        Some(_) => StatusCode::OK,
        None => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let view = check_session(&state).await;
    let status = if view.is_some() { "healthy" } else { "unhealthy" };

    Json(HealthResponse {
        status: status.to_string(),
        market_source: state.dashboard.source_name().to_string(),
        view,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn check_session(state: &AppState) -> Option<ViewState> {
    tokio::time::timeout(SESSION_CHECK_TIMEOUT, state.dashboard.view())
        .await
        .ok()
}
