//! `weatherdash` - simulated weather dashboard
//!
//! This library generates synthetic weather, air-quality and forecast
//! reports, resolves the device location with a fixed fallback, and renders
//! reports into an HTML dashboard served over HTTP.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod location_resolver;
pub mod models;
pub mod render;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, Screen, SessionState};
pub use error::{DashboardError, GeolocationError};
pub use generator::generate_report;
pub use location_resolver::{Geolocator, resolve_location};
pub use models::{AqiLevel, Coordinate, UnitSystem, WeatherCondition, WeatherReport, classify};
pub use render::{DisplayDocument, render};
pub use weather::{FetchKind, ReportRequest, SimulatedWeatherSource, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
