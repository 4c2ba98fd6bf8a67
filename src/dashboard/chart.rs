//! Chart specifications and render results
//!
//! A `ChartSpec` is everything the external chart renderer needs: the chart
//! kind, series data, axis labels, title and colors. It serializes to JSON
//! tagged by `kind` so the page script can hand it to plotly.js.

use serde::Serialize;

use super::records::Comparison;
use super::types::{Candle, Metric, Region, StockSymbol};

/// Bar color for US figures
pub const US_COLOR: &str = "#00008B";
/// Bar color for Global figures
pub const GLOBAL_COLOR: &str = "#FF0000";

/// Message shown when a stock fetch failed or returned no rows
pub const FETCH_FAILURE_MESSAGE: &str = "Could not fetch stock data";

/// Fixed two-color palette
pub fn region_color(region: Region) -> &'static str {
    match region {
        Region::Us => US_COLOR,
        Region::Global => GLOBAL_COLOR,
    }
}

/// One bar in a grouped comparison
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Request handed to the chart renderer
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    GroupedBar {
        title: String,
        x_axis_label: String,
        y_axis_label: String,
        bars: Vec<Bar>,
    },
    Candlestick {
        title: String,
        x_axis_label: String,
        y_axis_label: String,
        candles: Vec<Candle>,
    },
}

impl ChartSpec {
    /// US vs Global bars for an economic metric
    pub fn comparison(metric: Metric, pair: &Comparison) -> Self {
        let bars = [pair.us, pair.global]
            .iter()
            .map(|record| Bar {
                label: record.region.label().to_string(),
                value: record.value,
                color: region_color(record.region).to_string(),
            })
            .collect();

        ChartSpec::GroupedBar {
            title: format!("US vs Global Comparison in {}", metric.label()),
            x_axis_label: "Region".to_string(),
            y_axis_label: pair.unit().to_string(),
            bars,
        }
    }

    /// Daily candlesticks for a ticker
    pub fn candlestick(symbol: StockSymbol, candles: Vec<Candle>) -> Self {
        ChartSpec::Candlestick {
            title: format!("{} Stock Price", symbol),
            x_axis_label: "Date".to_string(),
            y_axis_label: "Price".to_string(),
            candles,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::GroupedBar { title, .. } | ChartSpec::Candlestick { title, .. } => title,
        }
    }
}

/// What the chart area displays
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RenderOutput {
    Chart(ChartSpec),
    Error { message: String },
}

/// Derived output of the dashboard: chart area plus summary line
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderResult {
    pub output: RenderOutput,
    pub summary: String,
}

impl RenderResult {
    pub fn fetch_failure() -> Self {
        Self {
            output: RenderOutput::Error {
                message: FETCH_FAILURE_MESSAGE.to_string(),
            },
            summary: format!("Error: {}", FETCH_FAILURE_MESSAGE),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.output, RenderOutput::Error { .. })
    }

    pub fn chart(&self) -> Option<&ChartSpec> {
        match &self.output {
            RenderOutput::Chart(spec) => Some(spec),
            RenderOutput::Error { .. } => None,
        }
    }
}

/// Summary line for an economic metric
pub fn comparison_summary(metric: Metric, pair: &Comparison) -> String {
    format!(
        "The U.S. {} value is: {} {}",
        metric.label(),
        pair.us.value,
        pair.us.unit
    )
}

/// Summary line for a stock, from the most recent candle
pub fn closing_price_summary(symbol: StockSymbol, latest: &Candle) -> String {
    format!(
        "The latest closing price for {} is: ${:.2}",
        symbol, latest.close
    )
}
