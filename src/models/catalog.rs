//! Condition catalog: icon glyphs and descriptions for weather conditions

use super::WeatherCondition;

/// Icon used for anything the catalog does not know
pub const DEFAULT_ICON: &str = "☀️";
/// Description used for anything the catalog does not know
pub const DEFAULT_DESCRIPTION: &str = "Pleasant weather";

impl WeatherCondition {
    /// Icon glyph shown for this condition
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀️",
            WeatherCondition::Cloudy => "☁️",
            WeatherCondition::Rainy => "🌧️",
            WeatherCondition::Snowy => "❄️",
            WeatherCondition::Stormy => "⛈️",
        }
    }

    /// Human-readable description
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear sky",
            WeatherCondition::Cloudy => "Partly cloudy",
            WeatherCondition::Rainy => "Light rain",
            WeatherCondition::Snowy => "Snow showers",
            WeatherCondition::Stormy => "Thunderstorms",
        }
    }
}

/// Icon for a condition key, falling back to [`DEFAULT_ICON`]
#[must_use]
pub fn icon_for(key: &str) -> &'static str {
    WeatherCondition::from_key(key).map_or(DEFAULT_ICON, WeatherCondition::icon)
}

/// Description for a condition key, falling back to [`DEFAULT_DESCRIPTION`]
#[must_use]
pub fn description_for(key: &str) -> &'static str {
    WeatherCondition::from_key(key).map_or(DEFAULT_DESCRIPTION, WeatherCondition::description)
}
