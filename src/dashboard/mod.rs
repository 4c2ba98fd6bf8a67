//! Dashboard core
//!
//! View toggle, metric selection and rendering. Nothing in here draws
//! anything: `render` produces a [`ChartSpec`] for the chart renderer and a
//! summary line for the text panel.
//!
//! ## Modules
//!
//! - [`types`]: Metric, symbol and date-range types
//! - [`records`]: Static US vs Global comparison table
//! - [`view`]: Landing/dashboard toggle
//! - [`chart`]: Chart specifications and render results
//! - [`controller`]: Synchronous session state
//! - [`service`]: Async owner that runs market-data fetches

pub mod chart;
pub mod controller;
pub mod records;
pub mod service;
pub mod types;
pub mod view;

pub use chart::{Bar, ChartSpec, RenderOutput, RenderResult, FETCH_FAILURE_MESSAGE};
pub use controller::{DashboardController, FetchTicket, StockFeed};
pub use records::{Comparison, EconomicRecord};
pub use service::{Dashboard, DashboardSnapshot};
pub use types::{
    Candle, DateRange, Metric, ParseSelectionError, Region, StockQuery, StockSymbol,
    MIN_STOCK_DATE,
};
pub use view::{ViewController, ViewState};
