//! Macroscope Dashboard Server
//!
//! Run with: cargo run --bin macroscope
//!
//! # Configuration
//!
//! Config file (first found): `--config PATH`,
//! `~/.config/macroscope/config.toml`, `/etc/macroscope/config.toml`,
//! `./config.toml`.
//!
//! Environment variables:
//! - `MACROSCOPE_HOST`: Host to bind to (default: 127.0.0.1)
//! - `MACROSCOPE_PORT`: Port to listen on (default: 8501)
//! - `MACROSCOPE_MARKET_URL`: Market-data base URL (default: Yahoo Finance)
//! - `MACROSCOPE_LOG_LEVEL`: Log level (default: info)
//! - `MACROSCOPE_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, overrides the log level

use clap::Parser;
use macroscope::api::{serve, ApiConfig, AppState};
use macroscope::config::{Config, ConfigError, LoggingConfig};
use macroscope::dashboard::Dashboard;
use macroscope::market::{YahooChartSource, YahooConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "macroscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "US vs Global economic dashboard server")]
struct Args {
    /// Path to a config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("macroscope=info")),
        )
        .finish();
    let mut config = load_config(args.config.as_deref(), bootstrap)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting Macroscope v{}", env!("CARGO_PKG_VERSION"));

    let yahoo_config = YahooConfig::from(&config.market);
    tracing::info!("Market data source: {}", yahoo_config.base_url);
    let source = Arc::new(YahooChartSource::new(yahoo_config)?);

    let dashboard = Arc::new(Dashboard::new(source));
    let api_config = ApiConfig::from(&config.server);

    serve(AppState::new(dashboard, api_config.clone()), &api_config).await?;

    tracing::info!("Macroscope stopped");
    Ok(())
}

/// Resolve the config while `bootstrap` collects its log events
///
/// The logging config is not known until loading finishes, so the global
/// subscriber cannot be installed yet.
fn load_config<S>(path: Option<&Path>, bootstrap: S) -> Result<Config, ConfigError>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::with_default(bootstrap, || Config::resolve(path))
}

/// Initialize the global subscriber from the logging config
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("macroscope={level},tower_http={level}", level = logging.level).into()
    });

    if logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
