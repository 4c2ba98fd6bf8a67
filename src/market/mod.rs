//! Market Data Sources
//!
//! The dashboard asks a source for daily candles of one ticker over an
//! inclusive date range. One request is issued per selection change; there
//! is no retry, caching or rate limiting on this path.
//!
//! - [`YahooChartSource`]: Yahoo Finance v8 chart endpoint over HTTP

mod yahoo;

pub use yahoo::{YahooChartSource, YahooConfig};

use async_trait::async_trait;

use crate::dashboard::{Candle, DateRange, StockSymbol};

/// Common trait for all market-data sources
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Short name used in logs and health output
    fn name(&self) -> &str;

    /// Daily OHLC rows for `symbol` within `range`, oldest first
    async fn daily_candles(
        &self,
        symbol: StockSymbol,
        range: DateRange,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

/// Errors that can occur while fetching market data
///
/// The dashboard collapses all of these into a single fetch-failure result;
/// the variants exist so logs say what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum MarketDataError {
    #[error("Market data source unavailable: {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No rows returned for {0}")]
    Empty(StockSymbol),
}

impl MarketDataError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MarketDataError::Timeout
        } else if err.is_connect() {
            MarketDataError::Unavailable(err.to_string())
        } else {
            MarketDataError::Request(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketDataError::Empty(StockSymbol::Jpm);
        assert_eq!(err.to_string(), "No rows returned for JPM");

        let err = MarketDataError::ApiError {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: Not Found");
    }
}
