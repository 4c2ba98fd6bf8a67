//! View Routes
//!
//! Landing/dashboard toggle.
//!
//! - GET /api/v1/view - Current view
//! - POST /api/v1/view/dashboard - Show the dashboard
//! - POST /api/v1/view/landing - Show the landing page

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::ViewResponse;
use crate::api::state::AppState;

/// GET /api/v1/view
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    Json(ViewResponse {
        view: state.dashboard.view().await,
    })
}

/// POST /api/v1/view/dashboard
///
/// Idempotent: returns the dashboard view whether or not it was already shown.
pub async fn enter_dashboard(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    Json(ViewResponse {
        view: state.dashboard.enter_dashboard().await,
    })
}

/// POST /api/v1/view/landing
///
/// Idempotent: returns the landing view whether or not it was already shown.
pub async fn return_to_landing(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    Json(ViewResponse {
        view: state.dashboard.return_to_landing().await,
    })
}
