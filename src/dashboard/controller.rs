//! Dashboard Controller
//!
//! Single owner of the dashboard's session state: the visible view, the
//! selected metric, the stock query and the outcome of the latest fetch.
//! Every UI event maps to one mutating method; `render` derives the chart
//! and summary from whatever the state is now.
//!
//! The controller never performs I/O. Methods that need market data hand
//! back a [`FetchTicket`]; the caller runs the fetch and reports the outcome
//! through [`DashboardController::complete_fetch`]. Only the most recently
//! issued ticket is accepted, so a slow response to an old request can never
//! overwrite a newer one.

use chrono::NaiveDate;
use serde::Serialize;

use super::chart::{closing_price_summary, comparison_summary, ChartSpec, RenderOutput, RenderResult};
use super::records;
use super::types::{Candle, Metric, StockQuery};
use super::view::{ViewController, ViewState};
use crate::market::MarketDataError;

/// A fetch the caller must run on behalf of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub query: StockQuery,
}

/// Outcome of the most recent stock fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StockFeed {
    /// No fetch issued yet
    Idle,
    /// A fetch is in flight
    Pending { ticket: u64 },
    /// The fetch returned at least one row
    Loaded { query: StockQuery, candles: Vec<Candle> },
    /// The fetch failed or returned no rows
    Failed { query: StockQuery },
}

/// Session state behind the dashboard page
#[derive(Debug, Clone)]
pub struct DashboardController {
    view: ViewController,
    metric: Metric,
    query: StockQuery,
    feed: StockFeed,
    next_ticket: u64,
}

impl DashboardController {
    /// Fresh session: landing view, GDP selected, AAPL over the last year
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: ViewController::new(),
            metric: Metric::default(),
            query: StockQuery::default_for(today),
            feed: StockFeed::Idle,
            next_ticket: 1,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view.state()
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn stock_query(&self) -> StockQuery {
        self.query
    }

    pub fn feed(&self) -> &StockFeed {
        &self.feed
    }

    pub fn enter_dashboard(&mut self) -> bool {
        self.view.enter_dashboard()
    }

    pub fn return_to_landing(&mut self) -> bool {
        self.view.return_to_landing()
    }

    /// Change the selected metric
    ///
    /// Selecting stock prices starts a fetch for the current query.
    /// Leaving stock prices abandons any fetch still pending; its outcome
    /// will be discarded when it arrives.
    pub fn select_metric(&mut self, metric: Metric) -> Option<FetchTicket> {
        if self.metric != metric {
            tracing::debug!(from = %self.metric, to = %metric, "Metric selected");
        }
        self.metric = metric;
        if !metric.is_stock() && matches!(self.feed, StockFeed::Pending { .. }) {
            self.feed = StockFeed::Idle;
        }
        self.fetch_if_stock()
    }

    /// Change the stock query
    ///
    /// The query is kept for later even when another metric is selected;
    /// a fetch starts only while stock prices are shown.
    pub fn select_stock(&mut self, query: StockQuery) -> Option<FetchTicket> {
        self.query = query;
        self.fetch_if_stock()
    }

    /// Re-run the fetch for the current query
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.fetch_if_stock()
    }

    fn fetch_if_stock(&mut self) -> Option<FetchTicket> {
        if self.metric.is_stock() {
            Some(self.begin_fetch())
        } else {
            None
        }
    }

    /// Issue a ticket for the current query, superseding any in-flight one
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.feed = StockFeed::Pending { ticket: id };
        FetchTicket {
            id,
            query: self.query,
        }
    }

    /// Record a fetch outcome
    ///
    /// Returns `false` and leaves the state untouched when `ticket` has been
    /// superseded by a later request.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Candle>, MarketDataError>,
    ) -> bool {
        match self.feed {
            StockFeed::Pending { ticket: current } if current == ticket.id => {}
            _ => {
                tracing::debug!(ticket = ticket.id, "Discarding superseded stock fetch");
                return false;
            }
        }

        self.feed = match outcome {
            Ok(candles) if !candles.is_empty() => StockFeed::Loaded {
                query: ticket.query,
                candles,
            },
            Ok(_) => {
                tracing::warn!(symbol = %ticket.query.symbol, "Stock fetch returned no rows");
                StockFeed::Failed {
                    query: ticket.query,
                }
            }
            Err(e) => {
                tracing::warn!(symbol = %ticket.query.symbol, error = %e, "Stock fetch failed");
                StockFeed::Failed {
                    query: ticket.query,
                }
            }
        };
        true
    }

    /// Chart and summary for the current state
    pub fn render(&self) -> RenderResult {
        match records::comparison(self.metric) {
            Some(pair) => RenderResult {
                output: RenderOutput::Chart(ChartSpec::comparison(self.metric, &pair)),
                summary: comparison_summary(self.metric, &pair),
            },
            None => self.render_stock(),
        }
    }

    /// Summary line for the current state
    pub fn summary(&self) -> String {
        self.render().summary
    }

    fn render_stock(&self) -> RenderResult {
        match &self.feed {
            StockFeed::Loaded { query, candles } => match candles.last() {
                Some(latest) => RenderResult {
                    summary: closing_price_summary(query.symbol, latest),
                    output: RenderOutput::Chart(ChartSpec::candlestick(
                        query.symbol,
                        candles.clone(),
                    )),
                },
                None => RenderResult::fetch_failure(),
            },
            StockFeed::Idle | StockFeed::Pending { .. } | StockFeed::Failed { .. } => {
                RenderResult::fetch_failure()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::chart::FETCH_FAILURE_MESSAGE;
    use crate::dashboard::types::{DateRange, StockSymbol};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                date: date(2023, 12, 1) + chrono::Duration::days(i as i64),
                open: close - 1.0,
                high: close + 1.0,
                low: close - 2.0,
                close,
            })
            .collect()
    }

    fn query_2023(symbol: StockSymbol) -> StockQuery {
        StockQuery {
            symbol,
            range: DateRange::normalized(date(2023, 1, 1), date(2023, 12, 31), today()),
        }
    }

    #[test]
    fn test_defaults() {
        let controller = DashboardController::new(today());
        assert_eq!(controller.view(), ViewState::Landing);
        assert_eq!(controller.metric(), Metric::Gdp);
        assert_eq!(controller.stock_query().symbol, StockSymbol::Aapl);
        assert_eq!(controller.stock_query().range.end, today());
        assert_eq!(controller.feed(), &StockFeed::Idle);
    }

    #[test]
    fn test_every_metric_renders() {
        let mut controller = DashboardController::new(today());
        for metric in Metric::all() {
            controller.select_metric(*metric);
            let result = controller.render();
            if metric.is_stock() {
                assert!(result.is_error());
            } else {
                assert!(matches!(
                    result.chart(),
                    Some(ChartSpec::GroupedBar { .. })
                ));
            }
        }
    }

    #[test]
    fn test_gdp_summary() {
        let mut controller = DashboardController::new(today());
        assert!(controller.select_metric(Metric::Gdp).is_none());
        assert_eq!(controller.summary(), "The U.S. GDP value is: 25 Trillions USD");
    }

    #[test]
    fn test_select_metric_is_idempotent() {
        let mut controller = DashboardController::new(today());
        controller.select_metric(Metric::Gdp);
        let first = controller.render();
        controller.select_metric(Metric::Gdp);
        let second = controller.render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stock_selection_issues_ticket() {
        let mut controller = DashboardController::new(today());
        let ticket = controller.select_metric(Metric::StockPrices).unwrap();
        assert_eq!(ticket.query, controller.stock_query());
        assert_eq!(controller.feed(), &StockFeed::Pending { ticket: ticket.id });
    }

    #[test]
    fn test_select_stock_without_stock_metric_only_stores() {
        let mut controller = DashboardController::new(today());
        let query = query_2023(StockSymbol::Ibm);
        assert!(controller.select_stock(query).is_none());
        assert_eq!(controller.stock_query(), query);
        assert_eq!(controller.feed(), &StockFeed::Idle);
    }

    #[test]
    fn test_failed_fetch_renders_error() {
        let mut controller = DashboardController::new(today());
        controller.select_metric(Metric::StockPrices);
        let ticket = controller.select_stock(query_2023(StockSymbol::Aapl)).unwrap();
        assert!(controller.complete_fetch(
            ticket,
            Err(MarketDataError::Unavailable("offline".to_string()))
        ));

        assert_eq!(controller.summary(), "Error: Could not fetch stock data");
        let result = controller.render();
        assert_eq!(
            result.output,
            RenderOutput::Error {
                message: FETCH_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_empty_fetch_renders_error() {
        let mut controller = DashboardController::new(today());
        let ticket = controller.select_metric(Metric::StockPrices).unwrap();
        controller.complete_fetch(ticket, Ok(Vec::new()));
        assert!(matches!(controller.feed(), StockFeed::Failed { .. }));
        assert!(controller.render().is_error());
    }

    #[test]
    fn test_loaded_fetch_renders_candlestick() {
        let mut controller = DashboardController::new(today());
        controller.select_metric(Metric::StockPrices);
        let ticket = controller.select_stock(query_2023(StockSymbol::Msft)).unwrap();
        controller.complete_fetch(ticket, Ok(candles(&[370.0, 372.5, 150.004])));

        let result = controller.render();
        match result.chart() {
            Some(ChartSpec::Candlestick { title, candles, .. }) => {
                assert_eq!(title, "MSFT Stock Price");
                assert_eq!(candles.len(), 3);
            }
            other => panic!("expected candlestick, got {:?}", other),
        }
        assert_eq!(
            result.summary,
            "The latest closing price for MSFT is: $150.00"
        );
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut controller = DashboardController::new(today());
        controller.select_metric(Metric::StockPrices);
        let old = controller.select_stock(query_2023(StockSymbol::Ibm)).unwrap();
        let new = controller.select_stock(query_2023(StockSymbol::Jpm)).unwrap();
        assert!(new.id > old.id);

        // Newer response lands first, older one arrives late
        assert!(controller.complete_fetch(new, Ok(candles(&[170.0]))));
        assert!(!controller.complete_fetch(old, Ok(candles(&[140.0]))));

        assert_eq!(
            controller.summary(),
            "The latest closing price for JPM is: $170.00"
        );
    }

    #[test]
    fn test_stale_response_does_not_resolve_pending() {
        let mut controller = DashboardController::new(today());
        controller.select_metric(Metric::StockPrices);
        let old = controller.refresh().unwrap();
        let new = controller.refresh().unwrap();

        assert!(!controller.complete_fetch(old, Ok(candles(&[1.0]))));
        assert_eq!(controller.feed(), &StockFeed::Pending { ticket: new.id });
    }

    #[test]
    fn test_switching_back_to_economic_metric() {
        let mut controller = DashboardController::new(today());
        let ticket = controller.select_metric(Metric::StockPrices).unwrap();
        controller.complete_fetch(ticket, Ok(candles(&[10.0])));
        controller.select_metric(Metric::Fdi);
        assert_eq!(
            controller.summary(),
            "The U.S. FDI value is: 285 Billions USD"
        );
    }

    #[test]
    fn test_leaving_stock_prices_abandons_pending_fetch() {
        let mut controller = DashboardController::new(today());
        controller.select_metric(Metric::StockPrices);
        let ticket = controller.select_stock(query_2023(StockSymbol::Msft)).unwrap();
        assert!(controller.select_metric(Metric::Gdp).is_none());
        assert_eq!(controller.feed(), &StockFeed::Idle);

        // The abandoned fetch still reports back, and is ignored
        assert!(!controller.complete_fetch(ticket, Ok(candles(&[300.0]))));
        assert_eq!(controller.feed(), &StockFeed::Idle);
        assert_eq!(controller.stock_query(), query_2023(StockSymbol::Msft));
    }

    #[test]
    fn test_view_toggle_keeps_selection() {
        let mut controller = DashboardController::new(today());
        assert!(controller.enter_dashboard());
        controller.select_metric(Metric::ConsumerSpending);
        assert!(controller.return_to_landing());
        assert!(controller.enter_dashboard());
        assert_eq!(controller.metric(), Metric::ConsumerSpending);
    }
}
