//! Page Routes
//!
//! The user-facing surface: the page rendered by [`crate::ui`], plus the
//! form actions its controls post to.
//!
//! - GET / - Landing or dashboard page
//! - POST /enter - "Enter Dashboard" button
//! - POST /landing - "Return to Landing Page" button
//! - POST /select - Metric, stock and date controls

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::dto::SelectionForm;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{Metric, StockSymbol};
use crate::ui;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let snapshot = state.dashboard.snapshot().await;
    Html(ui::render_page(snapshot, state.dashboard.today()))
}

/// POST /enter
pub async fn enter(State(state): State<Arc<AppState>>) -> Redirect {
    state.dashboard.enter_dashboard().await;
    Redirect::to("/")
}

/// POST /landing
pub async fn landing(State(state): State<Arc<AppState>>) -> Redirect {
    state.dashboard.return_to_landing().await;
    Redirect::to("/")
}

/// POST /select
pub async fn select(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SelectionForm>,
) -> ApiResult<Redirect> {
    let metric: Metric = form.metric.parse()?;

    let stock = match form.symbol.as_deref().filter(|s| !s.is_empty()) {
        Some(symbol) => Some((
            symbol.parse::<StockSymbol>()?,
            parse_date("start", form.start.as_deref())?,
            parse_date("end", form.end.as_deref())?,
        )),
        None => None,
    };

    state.dashboard.apply_selection(metric, stock).await;
    Ok(Redirect::to("/"))
}

/// Parse a date input; browsers send "" when the picker is cleared
fn parse_date(field: &str, value: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::Validation(format!("{} must be YYYY-MM-DD, got '{}'", field, v))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("start", None).unwrap(), None);
        assert_eq!(parse_date("start", Some("")).unwrap(), None);
        assert_eq!(
            parse_date("start", Some("2023-01-01")).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
        assert!(matches!(
            parse_date("end", Some("01/01/2023")),
            Err(ApiError::Validation(_))
        ));
    }
}
