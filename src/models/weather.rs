//! Weather report model: unit system, conditions, forecast and air quality

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Coordinate;
use crate::error::DashboardError;

/// Measurement system used for temperatures, speeds and distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Display labels attached to a report generated in this system
    #[must_use]
    pub fn labels(self) -> UnitLabels {
        match self {
            UnitSystem::Metric => UnitLabels {
                temperature: "°C".to_string(),
                speed: "km/h".to_string(),
                visibility: "km".to_string(),
            },
            UnitSystem::Imperial => UnitLabels {
                temperature: "°F".to_string(),
                speed: "mph".to_string(),
                visibility: "miles".to_string(),
            },
        }
    }

    /// Lowercase key used in URLs and configuration
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "celsius" | "c" => Ok(UnitSystem::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(UnitSystem::Imperial),
            other => Err(DashboardError::validation(format!(
                "unknown unit system '{other}'"
            ))),
        }
    }
}

impl Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit strings rendered next to values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLabels {
    pub temperature: String,
    pub speed: String,
    pub visibility: String,
}

/// Simulated weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
}

impl WeatherCondition {
    /// Pool sampled for current conditions
    pub const CURRENT: [WeatherCondition; 5] = [
        WeatherCondition::Clear,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Snowy,
        WeatherCondition::Stormy,
    ];

    /// Pool sampled for forecast days; storms are never forecast
    pub const FORECAST: [WeatherCondition; 4] = [
        WeatherCondition::Clear,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Snowy,
    ];

    /// Lowercase catalog key
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Snowy => "snowy",
            WeatherCondition::Stormy => "stormy",
        }
    }

    /// Parse a catalog key, `None` for anything unmapped
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::CURRENT.into_iter().find(|c| c.key() == key)
    }
}

/// Current conditions at the reported location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: i32,
    pub feels_like: i32,
    pub condition: WeatherCondition,
    /// Relative humidity in percent
    pub humidity: u8,
    pub wind_speed: u32,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    pub visibility: u32,
    /// UV index, 0 to 10
    pub uv_index: u8,
}

/// One card of the seven-day forecast strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: String,
    pub high: i32,
    pub low: i32,
    pub condition: WeatherCondition,
}

/// Air-quality snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: u32,
    pub pm25: u32,
    pub pm10: u32,
    pub o3: u32,
    pub no2: u32,
}

/// Complete output of one generation cycle. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Display label, either a searched place name or "Current Location"
    pub location: String,
    pub coordinate: Option<Coordinate>,
    pub unit: UnitSystem,
    pub units: UnitLabels,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub air_quality: AirQuality,
    pub generated_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Format a temperature value with the report's unit
    #[must_use]
    pub fn format_temperature(&self, value: i32) -> String {
        format!("{value}{}", self.units.temperature)
    }

    /// Format wind speed with the report's unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} {}", self.current.wind_speed, self.units.speed)
    }

    /// Format visibility with the report's unit
    #[must_use]
    pub fn format_visibility(&self) -> String {
        format!("{} {}", self.current.visibility, self.units.visibility)
    }

    /// Format atmospheric pressure with unit
    #[must_use]
    pub fn format_pressure(&self) -> String {
        format!("{} hPa", self.current.pressure)
    }
}
