//! Dashboard UI
//!
//! Leptos components rendered to HTML on the server. The page shows either
//! the landing view or the dashboard; charts are drawn in the browser by
//! plotly.js from the render result embedded in the page.

use chrono::NaiveDate;
use leptos::*;

use crate::dashboard::{DashboardSnapshot, ViewState};

mod components;
mod pages;

pub use components::{ChartPanel, MetricPicker, StockControls};
pub use pages::{DashboardPage, LandingPage};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render the full HTML document for the current snapshot
///
/// `today` is the latest date the range pickers accept.
pub fn render_page(snapshot: DashboardSnapshot, today: NaiveDate) -> String {
    let html = leptos::ssr::render_to_string(move || {
        view! { <Page snapshot=snapshot today=today /> }
    });
    format!("<!DOCTYPE html>{}", html)
}

/// Document shell
#[component]
fn Page(snapshot: DashboardSnapshot, today: NaiveDate) -> impl IntoView {
    let content = match snapshot.view {
        ViewState::Landing => view! { <LandingPage /> }.into_view(),
        ViewState::Dashboard => view! { <DashboardPage snapshot=snapshot today=today /> }.into_view(),
    };

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <title>"US vs Global Economic Dashboard"</title>
                <script src=PLOTLY_CDN></script>
            </head>
            <body>{content}</body>
        </html>
    }
}
