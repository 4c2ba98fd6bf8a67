//! Dashboard Components
//!
//! Form controls and the chart panel.

use chrono::NaiveDate;
use leptos::*;

use crate::dashboard::{Metric, RenderResult, StockQuery, StockSymbol, MIN_STOCK_DATE};

/// Metric dropdown
#[component]
pub fn MetricPicker(selected: Metric) -> impl IntoView {
    view! {
        <label>
            "Metric "
            <select name="metric">
                {Metric::all()
                    .iter()
                    .map(|metric| view! {
                        <option value={metric.as_str()} selected={*metric == selected}>
                            {metric.label()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Stock dropdown and date-range pickers, shown only for stock prices
#[component]
pub fn StockControls(query: StockQuery, today: NaiveDate) -> impl IntoView {
    let min = MIN_STOCK_DATE.to_string();
    let max = today.to_string();

    view! {
        <label>
            "Stock "
            <select name="symbol">
                {StockSymbol::all()
                    .iter()
                    .map(|symbol| view! {
                        <option value={symbol.as_str()} selected={*symbol == query.symbol}>
                            {symbol.as_str()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </label>
        <label>
            "From "
            <input
                type="date"
                name="start"
                value={query.range.start.to_string()}
                min={min.clone()}
                max={max.clone()}
            />
        </label>
        <label>
            "To "
            <input
                type="date"
                name="end"
                value={query.range.end.to_string()}
                min={min}
                max={max}
            />
        </label>
    }
}

/// Chart container plus summary line
///
/// The render result travels to the browser as JSON; plotly.js draws it.
#[component]
pub fn ChartPanel(result: RenderResult) -> impl IntoView {
    // `</` would end the script element early
    let payload = serde_json::to_string(&result)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");

    view! {
        <section class="chart">
            <div id="chart"></div>
            <p id="summary">{result.summary}</p>
            <script type="application/json" id="render-result" inner_html=payload></script>
            <script inner_html=CHART_SCRIPT></script>
        </section>
    }
}

/// Draws the embedded render result and submits the controls on change
const CHART_SCRIPT: &str = r#"(function () {
  document.querySelectorAll("form.controls select, form.controls input").forEach(function (el) {
    el.addEventListener("change", function () { el.form.submit(); });
  });
  var result = JSON.parse(document.getElementById("render-result").textContent);
  var el = document.getElementById("chart");
  if (!result) { return; }
  if (result.output.error) {
    el.textContent = result.output.error.message;
    return;
  }
  var spec = result.output.chart;
  var layout = {
    title: spec.title,
    xaxis: { title: spec.x_axis_label },
    yaxis: { title: spec.y_axis_label }
  };
  var traces;
  if (spec.kind === "grouped_bar") {
    layout.barmode = "group";
    traces = spec.bars.map(function (b) {
      return { type: "bar", name: b.label, x: [b.label], y: [b.value], marker: { color: b.color } };
    });
  } else {
    layout.xaxis.rangeslider = { visible: false };
    traces = [{
      type: "candlestick",
      x: spec.candles.map(function (c) { return c.date; }),
      open: spec.candles.map(function (c) { return c.open; }),
      high: spec.candles.map(function (c) { return c.high; }),
      low: spec.candles.map(function (c) { return c.low; }),
      close: spec.candles.map(function (c) { return c.close; })
    }];
  }
  if (window.Plotly) { Plotly.newPlot(el, traces, layout); }
})();"#;
