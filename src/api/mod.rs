//! Macroscope HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Landing or dashboard page
//! - `POST /enter` - Enter the dashboard (form action)
//! - `POST /landing` - Return to the landing page (form action)
//! - `POST /select` - Apply the dropdown and date controls (form action)
//!
//! ## View
//! - `GET /api/v1/view` - Current view
//! - `POST /api/v1/view/dashboard` - Show the dashboard
//! - `POST /api/v1/view/landing` - Show the landing page
//!
//! ## Selection
//! - `GET /api/v1/dashboard` - View, selection and render result
//! - `GET /api/v1/render` - Render result
//! - `POST /api/v1/selection/metric` - Select a metric
//! - `POST /api/v1/selection/stock` - Select a stock and date range
//! - `POST /api/v1/refresh` - Re-fetch stock data
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use macroscope::api::{serve, ApiConfig, AppState};
//! use macroscope::dashboard::Dashboard;
//! use macroscope::market::{YahooChartSource, YahooConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(YahooChartSource::new(YahooConfig::default())?);
//!     let dashboard = Arc::new(Dashboard::new(source));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(dashboard, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // View routes
        .route("/view", get(routes::view::get_view))
        .route("/view/dashboard", post(routes::view::enter_dashboard))
        .route("/view/landing", post(routes::view::return_to_landing))
        // Selection routes
        .route("/dashboard", get(routes::selection::get_dashboard))
        .route("/render", get(routes::selection::get_render))
        .route("/selection/metric", post(routes::selection::select_metric))
        .route("/selection/stock", post(routes::selection::select_stock))
        .route("/refresh", post(routes::selection::refresh));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let page_routes = Router::new()
        .route("/", get(routes::page::index))
        .route("/enter", post(routes::page::enter))
        .route("/landing", post(routes::page::landing))
        .route("/select", post(routes::page::select));

    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .merge(page_routes)
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Macroscope listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Macroscope shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::service::tests::ScriptedSource;
    use crate::dashboard::{Dashboard, StockSymbol};
    use crate::ui::tests::option_tag;
    use chrono::NaiveDate;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app(source: ScriptedSource) -> Router {
        let dashboard = Arc::new(Dashboard::new(Arc::new(source)));
        build_router(AppState::new(dashboard, ApiConfig::default()))
    }

    fn create_test_app_on(source: ScriptedSource, today: NaiveDate) -> Router {
        let dashboard = Arc::new(Dashboard::with_today(Arc::new(source), today));
        build_router(AppState::new(dashboard, ApiConfig::default()))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn text_body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app(ScriptedSource::default());

        assert_eq!(send(&app, get("/health/live")).await.status(), StatusCode::OK);
        assert_eq!(send(&app, get("/health/ready")).await.status(), StatusCode::OK);

        let response = send(&app, get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["market_source"], "scripted");
        assert_eq!(body["view"], "landing");
    }

    #[tokio::test]
    async fn test_view_toggle() {
        let app = create_test_app(ScriptedSource::default());

        let body = json_body(send(&app, get("/api/v1/view")).await).await;
        assert_eq!(body["view"], "landing");

        for _ in 0..2 {
            let response = send(&app, post_json("/api/v1/view/dashboard", "")).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await["view"], "dashboard");
        }

        let response = send(&app, post_json("/api/v1/view/landing", "")).await;
        assert_eq!(json_body(response).await["view"], "landing");
    }

    #[tokio::test]
    async fn test_select_metric_gdp() {
        let app = create_test_app(ScriptedSource::default());

        let response = send(&app, post_json("/api/v1/selection/metric", r#"{"metric": "gdp"}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["summary"], "The U.S. GDP value is: 25 Trillions USD");
        assert_eq!(body["output"]["chart"]["kind"], "grouped_bar");
        assert_eq!(body["output"]["chart"]["bars"][0]["color"], "#00008B");
    }

    #[tokio::test]
    async fn test_failed_stock_fetch_is_ok_response() {
        let app = create_test_app(ScriptedSource::failing());

        send(&app, post_json("/api/v1/selection/metric", r#"{"metric": "stock_prices"}"#)).await;
        let response = send(
            &app,
            post_json(
                "/api/v1/selection/stock",
                r#"{"symbol": "AAPL", "start": "2023-01-01", "end": "2023-12-31"}"#,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["summary"], "Error: Could not fetch stock data");
        assert_eq!(body["output"]["error"]["message"], "Could not fetch stock data");

        let body = json_body(send(&app, get("/api/v1/render")).await).await;
        assert_eq!(body["summary"], "Error: Could not fetch stock data");
    }

    #[tokio::test]
    async fn test_stock_candlestick_and_dashboard_snapshot() {
        let app = create_test_app(
            ScriptedSource::default().with_closes(StockSymbol::Ibm, &[141.2, 142.456]),
        );

        send(&app, post_json("/api/v1/selection/stock", r#"{"symbol": "IBM"}"#)).await;
        let response = send(&app, post_json("/api/v1/selection/metric", r#"{"metric": "stock_prices"}"#)).await;
        let body = json_body(response).await;
        assert_eq!(body["output"]["chart"]["kind"], "candlestick");
        assert_eq!(body["output"]["chart"]["title"], "IBM Stock Price");
        assert_eq!(body["summary"], "The latest closing price for IBM is: $142.46");

        let body = json_body(send(&app, get("/api/v1/dashboard")).await).await;
        assert_eq!(body["metric"], "stock_prices");
        assert_eq!(body["stock"]["symbol"], "IBM");

        let response = send(&app, post_json("/api/v1/refresh", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_metric_rejected() {
        let app = create_test_app(ScriptedSource::default());

        let response = send(&app, post_json("/api/v1/selection/metric", r#"{"metric": "inflation"}"#)).await;
        assert!(response.status().is_client_error());

        let response = send(&app, post_json("/api/v1/selection/metric", "not json")).await;
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_page_flow() {
        let app = create_test_app(ScriptedSource::default());

        let page = text_body(send(&app, get("/")).await).await;
        assert!(page.contains("Enter Dashboard"));

        let response = send(&app, post_form("/enter", "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let response = send(&app, post_form("/select", "metric=fdi")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let page = text_body(send(&app, get("/")).await).await;
        assert!(page.contains("Return to Landing Page"));
        assert!(page.contains("The U.S. FDI value is: 285 Billions USD"));
        assert!(option_tag(&page, "fdi").contains("selected"));
        assert!(!page.contains(r#"name="symbol""#));

        send(&app, post_form("/landing", "")).await;
        let page = text_body(send(&app, get("/")).await).await;
        assert!(page.contains("Enter Dashboard"));
    }

    #[tokio::test]
    async fn test_page_stock_controls() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let app = create_test_app_on(
            ScriptedSource::default().with_closes(StockSymbol::Msft, &[410.0]),
            today,
        );
        send(&app, post_form("/enter", "")).await;

        let response = send(
            &app,
            post_form("/select", "metric=stock_prices&symbol=MSFT&start=2024-01-01&end="),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let page = text_body(send(&app, get("/")).await).await;
        assert!(option_tag(&page, "MSFT").contains("selected"));
        assert!(page.contains(r#"value="2024-01-01""#));
        assert!(page.contains(r#"value="2024-06-01""#));
        assert!(page.contains(r#"min="2007-01-01""#));
        assert!(page.contains(r#"max="2024-06-01""#));
        assert!(page.contains("The latest closing price for MSFT is: $410.00"));
    }

    #[tokio::test]
    async fn test_page_select_rejects_bad_input() {
        let app = create_test_app(ScriptedSource::default());

        let response = send(&app, post_form("/select", "metric=inflation")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, post_form("/select", "metric=stock_prices&symbol=TSLA")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            post_form("/select", "metric=stock_prices&symbol=AAPL&start=yesterday"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
