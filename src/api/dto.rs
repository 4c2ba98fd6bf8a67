//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON or form bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dashboard::{Metric, StockSymbol, ViewState};

// ============================================
// VIEW DTOs
// ============================================

/// Current view response
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    /// "landing" or "dashboard"
    pub view: ViewState,
}

// ============================================
// SELECTION DTOs
// ============================================

/// Metric dropdown change
#[derive(Debug, Deserialize)]
pub struct SelectMetricRequest {
    pub metric: Metric,
}

/// Stock dropdown or date picker change
#[derive(Debug, Deserialize)]
pub struct SelectStockRequest {
    pub symbol: StockSymbol,
    /// Range start (YYYY-MM-DD), defaults to one year before today
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Range end (YYYY-MM-DD), defaults to today
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// Dashboard page form, submitted whenever a control changes
///
/// Fields arrive as raw strings; empty date inputs are sent as "".
#[derive(Debug, Deserialize)]
pub struct SelectionForm {
    pub metric: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Configured market-data source
    pub market_source: String,
    /// Current view, absent when the session did not answer in time
    pub view: Option<ViewState>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
