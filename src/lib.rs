//! # Macroscope
//!
//! A small economic comparison dashboard: US vs Global bar charts for a
//! fixed set of indicators, and daily candlestick charts for a handful of
//! stocks fetched from a market-data source.
//!
//! ## Features
//!
//! - **Landing / dashboard toggle**: exactly one view visible at a time
//! - **Static comparisons**: GDP, consumer spending, FDI and innovation index
//! - **Stock candlesticks**: Yahoo Finance daily bars for AAPL, IBM, MSFT, JPM
//! - **Latest request wins**: slow market-data responses never overwrite newer ones
//!
//! ## Modules
//!
//! - [`dashboard`]: View toggle, selection controller and chart specifications
//! - [`market`]: Market-data sources
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`ui`]: Leptos components for the server-rendered page
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use macroscope::dashboard::{Dashboard, Metric};
//! use macroscope::market::{YahooChartSource, YahooConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(YahooChartSource::new(YahooConfig::default())?);
//!     let dashboard = Dashboard::new(source);
//!
//!     dashboard.enter_dashboard().await;
//!     let result = dashboard.select_metric(Metric::Gdp).await;
//!     println!("{}", result.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod market;
pub mod ui;

// Re-export top-level types for convenience
pub use dashboard::{
    Candle, ChartSpec, Dashboard, DashboardController, DateRange, Metric, RenderOutput,
    RenderResult, StockQuery, StockSymbol, ViewState,
};

pub use market::{MarketDataError, MarketDataSource, YahooChartSource, YahooConfig};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, MarketConfig, ServerConfig};
