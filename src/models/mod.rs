//! Data models for the weather dashboard
//!
//! This module contains the core domain models organized by concern:
//! - Location: resolved coordinates
//! - Weather: unit system, conditions, forecast and the report bundle
//! - Catalog: icons and descriptions per condition
//! - Air quality: AQI severity classification

pub mod air_quality;
pub mod catalog;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use air_quality::{AqiLevel, classify, meter_position};
pub use location::Coordinate;
pub use weather::{
    AirQuality, CurrentConditions, ForecastDay, UnitLabels, UnitSystem, WeatherCondition,
    WeatherReport,
};
