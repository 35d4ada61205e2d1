//! Air-quality index classification

use serde::Serialize;

/// Severity band for an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiLevel {
    pub level: &'static str,
    /// CSS hex color used for the label
    pub color: &'static str,
}

/// AQI value at which the meter reads 100%
pub const METER_FULL_SCALE: f64 = 300.0;

const BANDS: [(u32, AqiLevel); 5] = [
    (50, AqiLevel { level: "Good", color: "#00e400" }),
    (100, AqiLevel { level: "Moderate", color: "#ffff00" }),
    (150, AqiLevel { level: "Unhealthy for Sensitive", color: "#ff7e00" }),
    (200, AqiLevel { level: "Unhealthy", color: "#ff0000" }),
    (300, AqiLevel { level: "Very Unhealthy", color: "#8f3f97" }),
];

const HAZARDOUS: AqiLevel = AqiLevel {
    level: "Hazardous",
    color: "#7e0023",
};

/// Classify an AQI value; the first band whose upper bound is not exceeded wins
#[must_use]
pub fn classify(aqi: u32) -> AqiLevel {
    BANDS
        .iter()
        .find(|(bound, _)| aqi <= *bound)
        .map_or(HAZARDOUS, |(_, level)| *level)
}

/// Indicator position on the AQI meter in percent. Not clamped, so values
/// above 300 land past the end of the meter.
#[must_use]
pub fn meter_position(aqi: u32) -> f64 {
    f64::from(aqi) / METER_FULL_SCALE * 100.0
}
