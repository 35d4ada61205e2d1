//! Report rendering
//!
//! Turns a [`WeatherReport`] into dashboard markup. Rendering is a pure
//! transformation; the report is only read.

use std::fmt::Write;

use serde::Serialize;

use crate::models::{UnitSystem, WeatherReport, classify, meter_position};

/// Markup for the dashboard content area
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayDocument {
    pub markup: String,
}

impl DisplayDocument {
    pub fn new<S: Into<String>>(markup: S) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.markup
    }
}

/// Escape text for use inside HTML element content and attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Placeholder shown while a search is pending
#[must_use]
pub fn loading_document() -> DisplayDocument {
    DisplayDocument::new(
        r#"<div class="loading"><div class="spinner"></div><p>Searching for weather data...</p></div>"#,
    )
}

/// Placeholder shown before the first report arrives
#[must_use]
pub fn locating_document() -> DisplayDocument {
    DisplayDocument::new(
        r#"<div class="loading"><div class="spinner"></div><p>Getting your location...</p></div>"#,
    )
}

fn detail_card(out: &mut String, icon: Option<&str>, value: &str, label: &str) {
    out.push_str(r#"<div class="detail-card">"#);
    if let Some(icon) = icon {
        let _ = write!(out, r#"<div class="detail-icon">{icon}</div>"#);
    }
    let _ = write!(
        out,
        r#"<div class="detail-value">{value}</div><div class="detail-label">{label}</div></div>"#
    );
}

/// Render a report into dashboard markup
#[must_use]
pub fn render(report: &WeatherReport) -> DisplayDocument {
    let mut out = String::with_capacity(4096);
    let current = &report.current;

    out.push_str(r#"<div class="weather-grid"><div class="main-weather">"#);
    let _ = write!(
        out,
        r#"<div class="weather-icon">{}</div><div class="temperature">{}</div><div class="location">{}</div><div class="description">{}</div>"#,
        current.condition.icon(),
        report.format_temperature(current.temperature),
        escape_html(&report.location),
        current.condition.description(),
    );

    out.push_str(r#"<div class="weather-details">"#);
    detail_card(&mut out, Some("🌡️"), &report.format_temperature(current.feels_like), "Feels Like");
    detail_card(&mut out, Some("💧"), &format!("{}%", current.humidity), "Humidity");
    detail_card(&mut out, Some("💨"), &report.format_wind(), "Wind Speed");
    detail_card(&mut out, Some("🔽"), &report.format_pressure(), "Pressure");
    detail_card(&mut out, Some("👁️"), &report.format_visibility(), "Visibility");
    detail_card(&mut out, Some("☀️"), &current.uv_index.to_string(), "UV Index");
    out.push_str("</div></div></div>");

    render_air_quality(&mut out, report);
    render_forecast(&mut out, report);

    DisplayDocument::new(out)
}

fn render_air_quality(out: &mut String, report: &WeatherReport) {
    let air = &report.air_quality;
    let level = classify(air.aqi);

    out.push_str(r#"<div class="air-quality"><h3 class="section-title">Air Quality</h3>"#);
    let _ = write!(
        out,
        r#"<div class="aqi-summary"><div class="aqi-value">{}</div><div class="aqi-level" style="color: {};">{}</div></div>"#,
        air.aqi, level.color, level.level
    );
    let _ = write!(
        out,
        r#"<div class="aqi-meter"><div class="aqi-indicator" style="left: {}%;"></div></div>"#,
        meter_position(air.aqi)
    );
    out.push_str(r#"<div class="weather-details">"#);
    detail_card(out, None, &air.pm25.to_string(), "PM2.5");
    detail_card(out, None, &air.pm10.to_string(), "PM10");
    detail_card(out, None, &air.o3.to_string(), "Ozone");
    detail_card(out, None, &air.no2.to_string(), "NO₂");
    out.push_str("</div></div>");
}

fn render_forecast(out: &mut String, report: &WeatherReport) {
    out.push_str(r#"<div class="forecast-section"><h3 class="section-title">7-Day Forecast</h3><div class="forecast-container">"#);
    for day in &report.forecast {
        let _ = write!(
            out,
            r#"<div class="forecast-card"><div class="forecast-day">{}</div><div class="forecast-icon">{}</div><div class="forecast-temps"><div class="forecast-high">{}</div><div class="forecast-low">{}</div></div></div>"#,
            escape_html(&day.day),
            day.condition.icon(),
            report.format_temperature(day.high),
            report.format_temperature(day.low),
        );
    }
    out.push_str("</div></div>");
}

const STYLE: &str = "body{font-family:sans-serif;background:#1e3c72;color:#fff;margin:0;padding:20px}\
.header{display:flex;gap:12px;align-items:center;flex-wrap:wrap}\
.header form{margin:0}\
.unit-btn{padding:6px 12px;border-radius:6px;color:#fff;text-decoration:none;border:none;cursor:pointer;background:rgba(255,255,255,.15)}\
.unit-btn.active{background:#fff;color:#1e3c72}\
.weather-details,.forecast-container{display:flex;gap:12px;flex-wrap:wrap}\
.detail-card,.forecast-card{background:rgba(255,255,255,.1);border-radius:10px;padding:12px;min-width:90px;text-align:center}\
.temperature{font-size:3rem;font-weight:bold}.weather-icon{font-size:4rem}\
.aqi-summary{text-align:center;margin-bottom:20px}.aqi-value{font-size:2rem;font-weight:bold}\
.aqi-meter{position:relative;height:10px;border-radius:5px;margin:10px 0;\
background:linear-gradient(to right,#00e400,#ffff00,#ff7e00,#ff0000,#8f3f97,#7e0023)}\
.aqi-indicator{position:absolute;top:-4px;width:4px;height:18px;background:#fff}";

/// Wrap dashboard content in a complete page with the search box and the
/// metric/imperial toggle. Exactly one toggle is marked active.
#[must_use]
pub fn page(content: &DisplayDocument, unit: UnitSystem) -> String {
    let (metric_class, imperial_class) = match unit {
        UnitSystem::Metric => ("unit-btn active", "unit-btn"),
        UnitSystem::Imperial => ("unit-btn", "unit-btn active"),
    };

    let mut out = String::with_capacity(content.markup.len() + 2048);
    let _ = write!(
        out,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>Weather Dashboard</title><style>{STYLE}</style></head><body>"#
    );
    let _ = write!(
        out,
        r#"<div class="header"><form action="/search" method="get"><input id="searchInput" type="text" name="q" placeholder="Search for a city..."></form><form action="/unit/metric" method="post"><button id="celsiusBtn" class="{metric_class}" type="submit">°C</button></form><form action="/unit/imperial" method="post"><button id="fahrenheitBtn" class="{imperial_class}" type="submit">°F</button></form><form action="/locate" method="post"><button type="submit">📍</button></form></div>"#
    );
    let _ = write!(
        out,
        r#"<div id="weatherContent">{}</div></body></html>"#,
        content.markup
    );
    out
}
