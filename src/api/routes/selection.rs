//! Selection Routes
//!
//! Metric and stock selection plus the derived render result.
//!
//! - GET /api/v1/dashboard - View, selection and render result
//! - GET /api/v1/render - Render result only
//! - POST /api/v1/selection/metric - Change the metric
//! - POST /api/v1/selection/stock - Change the stock and date range
//! - POST /api/v1/refresh - Re-fetch the current stock query
//!
//! Selection handlers wait for any market-data fetch they trigger, so the
//! response always carries the settled result. A failed fetch is still a
//! 200: the error lives inside the render result.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{SelectMetricRequest, SelectStockRequest};
use crate::api::state::AppState;
use crate::dashboard::{DashboardSnapshot, RenderResult};

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.snapshot().await)
}

/// GET /api/v1/render
pub async fn get_render(State(state): State<Arc<AppState>>) -> Json<RenderResult> {
    Json(state.dashboard.render().await)
}

/// POST /api/v1/selection/metric
pub async fn select_metric(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectMetricRequest>,
) -> Json<RenderResult> {
    Json(state.dashboard.select_metric(req.metric).await)
}

/// POST /api/v1/selection/stock
///
/// Reversed or out-of-bounds dates are normalized, never rejected.
pub async fn select_stock(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectStockRequest>,
) -> Json<RenderResult> {
    Json(
        state
            .dashboard
            .select_stock(req.symbol, req.start, req.end)
            .await,
    )
}

/// POST /api/v1/refresh
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RenderResult> {
    Json(state.dashboard.refresh().await)
}
