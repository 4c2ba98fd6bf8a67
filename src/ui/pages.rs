//! Landing and dashboard views

use chrono::NaiveDate;
use leptos::*;

use super::components::{ChartPanel, MetricPicker, StockControls};
use crate::dashboard::DashboardSnapshot;

/// Landing view with the single "Enter Dashboard" action
#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <main class="landing">
            <h1>"US vs Global Economic Dashboard"</h1>
            <p>
                "Compare US and global GDP, consumer spending, foreign direct investment "
                "and innovation, or chart daily stock prices for a handful of large US companies."
            </p>
            <form method="post" action="/enter">
                <button type="submit">"Enter Dashboard"</button>
            </form>
        </main>
    }
}

/// Dashboard view: selection controls, chart and summary
#[component]
pub fn DashboardPage(snapshot: DashboardSnapshot, today: NaiveDate) -> impl IntoView {
    let DashboardSnapshot {
        metric,
        stock,
        render,
        ..
    } = snapshot;

    view! {
        <main class="dashboard">
            <h1>"US vs Global Economic Dashboard"</h1>

            // Every control posts the whole form
            <form class="controls" method="post" action="/select">
                <MetricPicker selected=metric />
                {metric.is_stock().then(|| view! { <StockControls query=stock today=today /> })}
                <button type="submit">"Update"</button>
            </form>

            <ChartPanel result=render />

            <form method="post" action="/landing">
                <button type="submit">"Return to Landing Page"</button>
            </form>
        </main>
    }
}
