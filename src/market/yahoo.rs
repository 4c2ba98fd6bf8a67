//! Yahoo Finance Chart Source
//!
//! Fetches daily candles from the public v8 chart endpoint:
//! `GET {base_url}/v8/finance/chart/{symbol}?period1=..&period2=..&interval=1d`
//!
//! `period1` is the start date at 00:00 UTC and `period2` the day after the
//! end date at 00:00 UTC, so the end date itself is included.

use super::*;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use reqwest::Client;
use serde::Deserialize;

/// Yahoo Finance market-data source
pub struct YahooChartSource {
    client: Client,
    config: YahooConfig,
}

/// Configuration for the Yahoo chart client
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL (e.g., "https://query1.finance.yahoo.com")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// User-Agent header; the endpoint rejects requests without one
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            request_timeout_ms: 10_000,
            user_agent: format!("Macroscope/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl YahooChartSource {
    /// Create a new source with the given configuration
    pub fn new(config: YahooConfig) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// Build the chart URL for a query
    fn chart_url(&self, symbol: StockSymbol, range: DateRange) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(symbol.as_str()),
            midnight_utc(range.start),
            midnight_utc(range.end + Duration::days(1)),
        )
    }
}

#[async_trait]
impl MarketDataSource for YahooChartSource {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn daily_candles(
        &self,
        symbol: StockSymbol,
        range: DateRange,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let url = self.chart_url(symbol, range);
        tracing::debug!(%symbol, start = %range.start, end = %range.end, "Requesting Yahoo chart");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(MarketDataError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(MarketDataError::from_transport)?;
        parse_chart(&body, symbol)
    }
}

/// Unix seconds at the start of `date` in UTC
fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Turn a chart response body into candles
///
/// Rows with any missing OHLC value are skipped. Timestamps are shifted by
/// the exchange's GMT offset before taking the calendar date.
fn parse_chart(body: &str, symbol: StockSymbol) -> Result<Vec<Candle>, MarketDataError> {
    let response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::Parse(format!("failed to parse yahoo chart: {}", e)))?;

    if let Some(error) = response.chart.error {
        return Err(MarketDataError::ApiError {
            status: 200,
            message: format!("{}: {}", error.code, error.description),
        });
    }

    let result = match response.chart.result.and_then(|r| r.into_iter().next()) {
        Some(result) => result,
        None => return Err(MarketDataError::Empty(symbol)),
    };

    let offset = result.meta.map(|m| m.gmtoffset).unwrap_or(0);
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = match result.indicators.quote.into_iter().next() {
        Some(quote) => quote,
        None => return Err(MarketDataError::Empty(symbol)),
    };

    let mut candles = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = ts
            .checked_add(offset)
            .and_then(|local| DateTime::from_timestamp(local, 0))
            .ok_or_else(|| MarketDataError::Parse(format!("invalid timestamp: {}", ts)))?
            .date_naive();

        if let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) {
            candles.push(Candle {
                date,
                open: *open,
                high: *high,
                low: *low,
                close: *close,
            });
        }
    }

    if candles.is_empty() {
        return Err(MarketDataError::Empty(symbol));
    }

    Ok(candles)
}

// ============================================
// Response DTOs
// ============================================

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}
