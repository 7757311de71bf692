// src/view.rs
use crate::error::PredictionError;
use crate::models::{
    PredictionForm, PredictionOutcome, Signal, DAY_RANGE, MONTH_RANGE, YEAR_RANGE,
};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:16rem;padding:1rem;background:#f0f2f6}\
main{max-width:46rem;margin:0 auto;padding:1rem 2rem}\
.columns{display:flex;gap:2rem}.columns>div{flex:1}\
label{display:block;margin-top:.6rem}input{width:100%}\
.alert{padding:.8rem;border-radius:.4rem;margin:1rem 0}\
.success{background:#dff5e3}.warning{background:#fff6d6}.error{background:#fde2e2}\
.alert a{float:right;text-decoration:none}\
.metric{font-size:2rem;font-weight:bold}\
footer{text-align:center;color:gray}";

pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{}-{:02}-{:02}", year, month, day)
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

struct NumberInput<'a> {
    name: &'a str,
    label: &'a str,
    value: &'a str,
    step: &'a str,
    min: Option<String>,
    max: Option<String>,
}

impl NumberInput<'_> {
    fn render(&self, html: &mut String) {
        let _ = write!(
            html,
            r#"<label for="{name}">{label}</label><input type="number" id="{name}" name="{name}" value="{value}" step="{step}""#,
            name = self.name,
            label = self.label,
            value = escape(self.value),
            step = self.step,
        );
        if let Some(min) = &self.min {
            let _ = write!(html, r#" min="{}""#, min);
        }
        if let Some(max) = &self.max {
            let _ = write!(html, r#" max="{}""#, max);
        }
        html.push_str(" required>");
    }
}

fn price_input<'a>(name: &'a str, label: &'a str, value: &'a str) -> NumberInput<'a> {
    NumberInput {
        name,
        label,
        value,
        step: "any",
        min: None,
        max: None,
    }
}

fn ranged_input<'a, T: ToString>(
    name: &'a str,
    label: &'a str,
    value: &'a str,
    (min, max): (T, T),
) -> NumberInput<'a> {
    NumberInput {
        name,
        label,
        value,
        step: "1",
        min: Some(min.to_string()),
        max: Some(max.to_string()),
    }
}

fn render_form(html: &mut String, form: &PredictionForm) {
    html.push_str("<h2>📊 Input Parameters</h2>");
    html.push_str(r#"<form method="post" action="/predict"><div class="columns"><div>"#);
    html.push_str("<h3>Price Data</h3>");
    price_input("open_price", "Open Price", &form.open_price).render(html);
    price_input("high_price", "High Price", &form.high_price).render(html);
    price_input("low_price", "Low Price", &form.low_price).render(html);
    NumberInput {
        name: "volume",
        label: "Volume",
        value: &form.volume,
        step: "1",
        min: Some("0".to_string()),
        max: None,
    }
    .render(html);
    html.push_str("</div><div><h3>Technical Indicators</h3>");
    price_input("ma50", "50-Day Moving Average (MA50)", &form.ma50).render(html);
    price_input("ma200", "200-Day Moving Average (MA200)", &form.ma200).render(html);
    html.push_str("<h3>Date Information</h3>");
    ranged_input("year", "Year", &form.year, YEAR_RANGE).render(html);
    ranged_input("month", "Month", &form.month, MONTH_RANGE).render(html);
    ranged_input("day", "Day", &form.day, DAY_RANGE).render(html);
    html.push_str(
        r#"</div></div><p><button type="submit">🚀 Predict Stock Price</button></p></form>"#,
    );
}

fn render_outcome(html: &mut String, outcome: &PredictionOutcome) {
    let request = &outcome.request;
    let result = &outcome.result;
    html.push_str(r#"<div class="alert success">✅ Prediction completed successfully!</div>"#);
    html.push_str(r#"<h2>📋 Results</h2><div class="columns"><div><h3>Input Summary</h3><ul>"#);
    let summary = [
        ("Open", format_currency(request.open_price)),
        ("High", format_currency(request.high_price)),
        ("Low", format_currency(request.low_price)),
        ("Volume", format_thousands(request.volume)),
        ("MA50", format_currency(request.ma50)),
        ("MA200", format_currency(request.ma200)),
        ("Date", format_date(request.year, request.month, request.day)),
    ];
    for (label, value) in summary {
        let _ = write!(html, "<li><strong>{}:</strong> {}</li>", label, value);
    }
    let _ = write!(
        html,
        r#"</ul></div><div><h3>Prediction</h3><div>Estimated Stock Price</div><div class="metric">{}</div>"#,
        format_currency(result.predicted_price)
    );
    match result.signal {
        Signal::Bullish => html.push_str(
            r#"<div class="alert success">📈 Bullish signal: Predicted price is higher than opening price</div>"#,
        ),
        Signal::Bearish => html.push_str(
            r#"<div class="alert warning">📉 Bearish signal: Predicted price is lower than opening price</div>"#,
        ),
    }
    html.push_str("</div></div>");
}

fn render_error(html: &mut String, err: &PredictionError) {
    let _ = write!(
        html,
        r#"<div class="alert error" role="alert">❌ {}<a href="/" title="Dismiss">✕</a></div>"#,
        escape(&err.user_message())
    );
}

/// Full page. `submission` is `None` before the first submit.
pub fn render_page(
    form: &PredictionForm,
    submission: Option<&Result<PredictionOutcome, PredictionError>>,
) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>Stock Price Predictor</title><link rel="icon" href="data:,📈"><style>{}</style></head><body>"#,
        STYLE
    );
    html.push_str(
        "<aside><h2>About</h2><p>This machine learning model uses historical stock data and technical indicators \
         to predict future stock prices. The model was trained on various market features.</p></aside>",
    );
    html.push_str("<main><h1>📈 Stock Price Prediction App</h1>");
    html.push_str(
        "<p>This app predicts stock prices based on technical indicators and market data. \
         Enter the required parameters below and click <strong>Predict</strong> to get the estimated price.</p>",
    );
    render_form(&mut html, form);
    match submission {
        Some(Ok(outcome)) => render_outcome(&mut html, outcome),
        Some(Err(err)) => render_error(&mut html, err),
        None => {}
    }
    html.push_str(
        "<hr><h2>ℹ️ How to Use</h2><ol>\
         <li><strong>Open Price</strong>: The stock's opening price previous day</li>\
         <li><strong>High Price</strong>: The highest price reached during the previous trading day</li>\
         <li><strong>Low Price</strong>: The lowest price reached during the previous trading day</li>\
         <li><strong>MA50</strong>: 50-day moving average - average of last 50 days' previous closing prices</li>\
         <li><strong>MA200</strong>: 200-day moving average - average of last 200 days' previous closing prices</li>\
         <li><strong>Volume</strong>: Number of shares traded in previous day</li>\
         <li><strong>Date</strong>: The specific date for prediction</li></ol>\
         <p>Fill in all the fields and click the <strong>Predict</strong> button to get the estimated stock price.</p>",
    );
    html.push_str("<hr><footer>Stock Price Prediction App</footer></main></body></html>");
    html
}
