//! Core data types for the dashboard
//!
//! This module defines the closed sets the dashboard branches on:
//! - `Metric`: What the chart area shows
//! - `Region`: The two sides of an economic comparison
//! - `StockSymbol`: Tickers offered for candlestick charts
//! - `DateRange` and `StockQuery`: What a market-data fetch asks for
//! - `Candle`: One daily OHLC row returned by a fetch

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Earliest date the stock date pickers accept
pub const MIN_STOCK_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2007, 1, 1) {
    Some(date) => date,
    None => panic!("invalid minimum stock date"),
};

/// Length of the default stock window, in days
pub const DEFAULT_RANGE_DAYS: i64 = 365;

/// Metric selected in the dashboard dropdown
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Gross domestic product
    #[default]
    Gdp,
    /// Household consumption expenditure
    ConsumerSpending,
    /// Foreign direct investment inflows
    Fdi,
    /// Composite innovation score
    InnovationIndex,
    /// Daily candlesticks for a selected ticker
    StockPrices,
}

impl Metric {
    /// All metrics in dropdown order
    pub fn all() -> &'static [Metric] {
        &[
            Metric::Gdp,
            Metric::ConsumerSpending,
            Metric::Fdi,
            Metric::InnovationIndex,
            Metric::StockPrices,
        ]
    }

    /// Label shown in the dropdown, chart titles and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Gdp => "GDP",
            Metric::ConsumerSpending => "Consumer Spending",
            Metric::Fdi => "FDI",
            Metric::InnovationIndex => "Innovation Index",
            Metric::StockPrices => "Stock Prices",
        }
    }

    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Gdp => "gdp",
            Metric::ConsumerSpending => "consumer_spending",
            Metric::Fdi => "fdi",
            Metric::InnovationIndex => "innovation_index",
            Metric::StockPrices => "stock_prices",
        }
    }

    /// Whether this metric is served from the market-data source
    pub fn is_stock(&self) -> bool {
        matches!(self, Metric::StockPrices)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Metric {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Metric::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| ParseSelectionError::UnknownMetric(s.to_string()))
    }
}

/// Side of an economic comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    Global,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Global => "Global",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ticker offered in the stock dropdown
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockSymbol {
    #[default]
    Aapl,
    Ibm,
    Msft,
    Jpm,
}

impl StockSymbol {
    pub fn all() -> &'static [StockSymbol] {
        &[
            StockSymbol::Aapl,
            StockSymbol::Ibm,
            StockSymbol::Msft,
            StockSymbol::Jpm,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockSymbol::Aapl => "AAPL",
            StockSymbol::Ibm => "IBM",
            StockSymbol::Msft => "MSFT",
            StockSymbol::Jpm => "JPM",
        }
    }
}

impl std::fmt::Display for StockSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StockSymbol {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        StockSymbol::all()
            .iter()
            .copied()
            .find(|sym| sym.as_str() == upper)
            .ok_or_else(|| ParseSelectionError::UnknownSymbol(s.to_string()))
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The last `DEFAULT_RANGE_DAYS` days ending at `today`
    pub fn default_for(today: NaiveDate) -> Self {
        Self::normalized(today - Duration::days(DEFAULT_RANGE_DAYS), today, today)
    }

    /// Build a range from picker input
    ///
    /// Reversed bounds are swapped, then both ends are clamped into
    /// `[MIN_STOCK_DATE, today]`. Never fails.
    pub fn normalized(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let upper = today.max(MIN_STOCK_DATE);
        Self {
            start: start.clamp(MIN_STOCK_DATE, upper),
            end: end.clamp(MIN_STOCK_DATE, upper),
        }
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Parameters of a market-data fetch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockQuery {
    pub symbol: StockSymbol,
    pub range: DateRange,
}

impl StockQuery {
    /// AAPL over the last year
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            symbol: StockSymbol::default(),
            range: DateRange::default_for(today),
        }
    }
}

/// One daily OHLC row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Errors from parsing dropdown values typed on the command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSelectionError {
    #[error("unknown metric '{0}' (expected gdp, consumer_spending, fdi, innovation_index or stock_prices)")]
    UnknownMetric(String),

    #[error("unknown stock symbol '{0}' (expected AAPL, IBM, MSFT or JPM)")]
    UnknownSymbol(String),
}
