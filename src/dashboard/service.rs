//! Dashboard Service
//!
//! Async wrapper that owns the [`DashboardController`] and the market-data
//! source. Mutations take the write lock briefly; fetches run with the lock
//! released so other requests keep being served while the source responds.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::chart::RenderResult;
use super::controller::{DashboardController, FetchTicket, StockFeed};
use super::types::{DateRange, Metric, StockQuery, StockSymbol};
use super::view::ViewState;
use crate::market::MarketDataSource;

/// Point-in-time copy of the dashboard for API responses
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardSnapshot {
    pub view: ViewState,
    pub metric: Metric,
    pub stock: StockQuery,
    pub render: RenderResult,
}

/// Shared dashboard session
pub struct Dashboard {
    controller: RwLock<DashboardController>,
    source: Arc<dyn MarketDataSource>,
    /// Fixed calendar date; `None` follows the UTC clock
    pinned_today: Option<NaiveDate>,
}

impl Dashboard {
    /// Create a dashboard that follows the UTC calendar
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self::build(source, None)
    }

    /// Create a dashboard whose "today" is fixed at `today`
    ///
    /// Default windows and range clamping all use this date.
    pub fn with_today(source: Arc<dyn MarketDataSource>, today: NaiveDate) -> Self {
        Self::build(source, Some(today))
    }

    fn build(source: Arc<dyn MarketDataSource>, pinned_today: Option<NaiveDate>) -> Self {
        let today = pinned_today.unwrap_or_else(utc_today);
        Self {
            controller: RwLock::new(DashboardController::new(today)),
            source,
            pinned_today,
        }
    }

    /// Latest selectable date for stock ranges
    pub fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(utc_today)
    }

    /// Name of the configured market-data source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub async fn view(&self) -> ViewState {
        self.controller.read().await.view()
    }

    pub async fn enter_dashboard(&self) -> ViewState {
        let mut controller = self.controller.write().await;
        if controller.enter_dashboard() {
            tracing::info!("Entered dashboard");
        }
        controller.view()
    }

    pub async fn return_to_landing(&self) -> ViewState {
        let mut controller = self.controller.write().await;
        if controller.return_to_landing() {
            tracing::info!("Returned to landing page");
        }
        controller.view()
    }

    /// Select a metric and, for stock prices, wait for the fetch
    pub async fn select_metric(&self, metric: Metric) -> RenderResult {
        let ticket = self.controller.write().await.select_metric(metric);
        tracing::info!(metric = %metric, "Metric selected");
        self.settle(ticket).await
    }

    /// Select a stock and date range, then wait for the fetch if one starts
    ///
    /// Missing dates fall back to the default one-year window. The range is
    /// normalized against today's date.
    pub async fn select_stock(
        &self,
        symbol: StockSymbol,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RenderResult {
        let range = resolve_range(start, end, self.today());

        let ticket = self
            .controller
            .write()
            .await
            .select_stock(StockQuery { symbol, range });
        tracing::info!(%symbol, start = %range.start, end = %range.end, "Stock selected");
        self.settle(ticket).await
    }

    /// Apply a whole dropdown form at once: stock query first, then metric
    ///
    /// At most one fetch runs; the metric change supersedes any ticket the
    /// stock change issued.
    pub async fn apply_selection(
        &self,
        metric: Metric,
        stock: Option<(StockSymbol, Option<NaiveDate>, Option<NaiveDate>)>,
    ) -> RenderResult {
        let ticket = {
            let mut controller = self.controller.write().await;
            if let Some((symbol, start, end)) = stock {
                let range = resolve_range(start, end, self.today());
                controller.select_stock(StockQuery { symbol, range });
            }
            controller.select_metric(metric)
        };
        tracing::info!(metric = %metric, "Selection applied");
        self.settle(ticket).await
    }

    /// Re-fetch the current stock query
    pub async fn refresh(&self) -> RenderResult {
        let ticket = self.controller.write().await.refresh();
        self.settle(ticket).await
    }

    /// Current chart and summary
    pub async fn render(&self) -> RenderResult {
        self.controller.read().await.render()
    }

    pub async fn summary(&self) -> String {
        self.controller.read().await.summary()
    }

    /// Whether a stock fetch is still in flight
    pub async fn is_fetching(&self) -> bool {
        matches!(
            self.controller.read().await.feed(),
            StockFeed::Pending { .. }
        )
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let controller = self.controller.read().await;
        DashboardSnapshot {
            view: controller.view(),
            metric: controller.metric(),
            stock: controller.stock_query(),
            render: controller.render(),
        }
    }

    /// Run the fetch for `ticket` (if any) and return the resulting render
    async fn settle(&self, ticket: Option<FetchTicket>) -> RenderResult {
        if let Some(ticket) = ticket {
            let outcome = self
                .source
                .daily_candles(ticket.query.symbol, ticket.query.range)
                .await;

            if let Ok(candles) = &outcome {
                tracing::debug!(
                    ticket = ticket.id,
                    rows = candles.len(),
                    source = self.source.name(),
                    "Stock fetch returned"
                );
            }

            self.controller.write().await.complete_fetch(ticket, outcome);
        }

        self.render().await
    }
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Fill missing picker values from the default window, then normalize
fn resolve_range(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> DateRange {
    let default = DateRange::default_for(today);
    DateRange::normalized(
        start.unwrap_or(default.start),
        end.unwrap_or(default.end),
        today,
    )
}
