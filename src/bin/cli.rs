//! Macroscope CLI
//!
//! Command-line client for a running Macroscope server:
//! - Toggle between landing page and dashboard
//! - Select metrics, stocks and date ranges
//! - Print the current chart and summary
//! - Generate a default config file

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use macroscope::config::generate_default_config;
use macroscope::dashboard::{Metric, StockSymbol};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "macroscope-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drive a Macroscope dashboard from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://127.0.0.1:8501", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server status
    Status,

    /// Show which view is visible
    View,

    /// Enter the dashboard
    Enter,

    /// Return to the landing page
    Leave,

    /// Select a metric (gdp, consumer_spending, fdi, innovation_index, stock_prices)
    Metric {
        metric: Metric,
    },

    /// Select a stock and date range
    Stock {
        /// Ticker (AAPL, IBM, MSFT, JPM)
        symbol: StockSymbol,
        /// Range start (YYYY-MM-DD), default one year ago
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Range end (YYYY-MM-DD), default today
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Print the current chart and summary
    Render,

    /// Re-fetch stock data for the current selection
    Refresh,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.api_url.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Status => {
            let health = get_json(&client, &format!("{}/health", base)).await?;
            println!("Macroscope v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Server status: {}", health["status"].as_str().unwrap_or("unknown"));
            println!("Market source: {}", health["market_source"].as_str().unwrap_or("unknown"));
            println!("View:          {}", health["view"].as_str().unwrap_or("unknown"));
            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!("Uptime:        {}", format_duration(uptime));
            }
        }

        Commands::View => {
            let view = get_json(&client, &format!("{}/api/v1/view", base)).await?;
            print_view(&view, &cli.format)?;
        }

        Commands::Enter => {
            let view = post_json(&client, &format!("{}/api/v1/view/dashboard", base), None).await?;
            print_view(&view, &cli.format)?;
        }

        Commands::Leave => {
            let view = post_json(&client, &format!("{}/api/v1/view/landing", base), None).await?;
            print_view(&view, &cli.format)?;
        }

        Commands::Metric { metric } => {
            let body = serde_json::json!({ "metric": metric });
            let result = post_json(
                &client,
                &format!("{}/api/v1/selection/metric", base),
                Some(&body),
            )
            .await?;
            print_render(&result, &cli.format)?;
        }

        Commands::Stock { symbol, start, end } => {
            let body = serde_json::json!({ "symbol": symbol, "start": start, "end": end });
            let result = post_json(
                &client,
                &format!("{}/api/v1/selection/stock", base),
                Some(&body),
            )
            .await?;
            print_render(&result, &cli.format)?;
        }

        Commands::Render => {
            let result = get_json(&client, &format!("{}/api/v1/render", base)).await?;
            print_render(&result, &cli.format)?;
        }

        Commands::Refresh => {
            let result = post_json(&client, &format!("{}/api/v1/refresh", base), None).await?;
            print_render(&result, &cli.format)?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

async fn get_json(client: &reqwest::Client, url: &str) -> anyhow::Result<Value> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("cannot connect to Macroscope at {}", url))?;
    read_json(response).await
}

async fn post_json(
    client: &reqwest::Client,
    url: &str,
    body: Option<&Value>,
) -> anyhow::Result<Value> {
    let mut request = client.post(url);
    if let Some(body) = body {
        request = request.json(body);
    }
    let response = request
        .send()
        .await
        .with_context(|| format!("cannot connect to Macroscope at {}", url))?;
    read_json(response).await
}

async fn read_json(response: reqwest::Response) -> anyhow::Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        bail!("request failed ({}): {}", status, text);
    }
    Ok(response.json().await?)
}

fn print_view(view: &Value, format: &str) -> anyhow::Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        println!("View: {}", view["view"].as_str().unwrap_or("unknown"));
    }
    Ok(())
}

fn print_render(result: &Value, format: &str) -> anyhow::Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", describe_render(result));
    }
    Ok(())
}

/// Text rendition of a render result: chart outline, then summary
fn describe_render(result: &Value) -> String {
    let mut out = String::new();
    let output = &result["output"];

    if let Some(message) = output["error"]["message"].as_str() {
        out.push_str(&format!("[chart unavailable: {}]\n", message));
    } else {
        let chart = &output["chart"];
        out.push_str(&format!("{}\n", chart["title"].as_str().unwrap_or("-")));
        out.push_str(&format!("{}\n", "-".repeat(60)));

        match chart["kind"].as_str() {
            Some("grouped_bar") => {
                let unit = chart["y_axis_label"].as_str().unwrap_or("");
                for bar in chart["bars"].as_array().into_iter().flatten() {
                    out.push_str(&format!(
                        "{:<10} {:>12} {}\n",
                        bar["label"].as_str().unwrap_or("-"),
                        bar["value"].as_f64().map(|v| v.to_string()).unwrap_or_default(),
                        unit
                    ));
                }
            }
            Some("candlestick") => {
                let candles = chart["candles"].as_array().cloned().unwrap_or_default();
                out.push_str(&format!(
                    "{:<12} {:>10} {:>10} {:>10} {:>10}\n",
                    "Date", "Open", "High", "Low", "Close"
                ));
                let skip = candles.len().saturating_sub(5);
                for candle in candles.iter().skip(skip) {
                    out.push_str(&format!(
                        "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
                        candle["date"].as_str().unwrap_or("-"),
                        candle["open"].as_f64().unwrap_or(0.0),
                        candle["high"].as_f64().unwrap_or(0.0),
                        candle["low"].as_f64().unwrap_or(0.0),
                        candle["close"].as_f64().unwrap_or(0.0),
                    ));
                }
                if skip > 0 {
                    out.push_str(&format!("({} earlier rows not shown)\n", skip));
                }
            }
            _ => {}
        }
    }

    out.push('\n');
    out.push_str(result["summary"].as_str().unwrap_or(""));
    out.push('\n');
    out
}

fn format_duration(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, seconds % 60)
    }
}
