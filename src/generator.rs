//! Random weather generation
//!
//! Produces synthetic current conditions, a seven-day forecast and an
//! air-quality snapshot. Every value is sampled independently from a fixed
//! integer range; only the temperature ranges depend on the unit system.

use std::ops::RangeInclusive;

use chrono::Utc;
use rand::RngExt;
use tracing::debug;

use crate::models::{
    AirQuality, Coordinate, CurrentConditions, ForecastDay, UnitSystem, WeatherCondition,
    WeatherReport,
};

/// Forecast day labels, in display order
pub const FORECAST_DAYS: [&str; 7] = ["Today", "Tomorrow", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub const HUMIDITY_RANGE: RangeInclusive<u8> = 40..=79;
pub const WIND_SPEED_RANGE: RangeInclusive<u32> = 5..=24;
pub const PRESSURE_RANGE: RangeInclusive<u32> = 1000..=1049;
pub const VISIBILITY_RANGE: RangeInclusive<u32> = 5..=14;
pub const UV_INDEX_RANGE: RangeInclusive<u8> = 0..=10;
pub const FEELS_LIKE_OFFSET: RangeInclusive<i32> = -3..=3;

pub const FORECAST_DAY_OFFSET: RangeInclusive<i32> = -5..=4;
pub const FORECAST_HIGH_SPREAD: RangeInclusive<i32> = 0..=4;
pub const FORECAST_LOW_SPREAD: RangeInclusive<i32> = 0..=7;

pub const AQI_RANGE: RangeInclusive<u32> = 50..=249;
pub const PM25_RANGE: RangeInclusive<u32> = 10..=59;
pub const PM10_RANGE: RangeInclusive<u32> = 20..=99;
pub const O3_RANGE: RangeInclusive<u32> = 50..=149;
pub const NO2_RANGE: RangeInclusive<u32> = 20..=99;

/// Base temperature range for a unit system
#[must_use]
pub fn temperature_range(unit: UnitSystem) -> RangeInclusive<i32> {
    match unit {
        UnitSystem::Metric => 5..=34,
        UnitSystem::Imperial => 40..=89,
    }
}

fn pick<R: RngExt + ?Sized>(rng: &mut R, pool: &[WeatherCondition]) -> WeatherCondition {
    pool[rng.random_range(0..pool.len())]
}

/// Generate a complete report for a location label.
///
/// `coordinate` is recorded on the report as given; a searched place name
/// has none.
pub fn generate_report<R: RngExt + ?Sized>(
    rng: &mut R,
    location: &str,
    coordinate: Option<Coordinate>,
    unit: UnitSystem,
) -> WeatherReport {
    let condition = pick(rng, &WeatherCondition::CURRENT);
    let base_temperature = rng.random_range(temperature_range(unit));

    let current = CurrentConditions {
        temperature: base_temperature,
        feels_like: base_temperature + rng.random_range(FEELS_LIKE_OFFSET),
        condition,
        humidity: rng.random_range(HUMIDITY_RANGE),
        wind_speed: rng.random_range(WIND_SPEED_RANGE),
        pressure: rng.random_range(PRESSURE_RANGE),
        visibility: rng.random_range(VISIBILITY_RANGE),
        uv_index: rng.random_range(UV_INDEX_RANGE),
    };

    let forecast = generate_forecast(rng, base_temperature);
    let air_quality = generate_air_quality(rng);

    debug!(
        location,
        ?unit,
        temperature = base_temperature,
        condition = condition.key(),
        aqi = air_quality.aqi,
        "Generated weather report"
    );

    WeatherReport {
        location: location.to_string(),
        coordinate,
        unit,
        units: unit.labels(),
        current,
        forecast,
        air_quality,
        generated_at: Utc::now(),
    }
}

/// Generate a report using the thread-local random source
pub fn generate_report_with_thread_rng(
    location: &str,
    coordinate: Option<Coordinate>,
    unit: UnitSystem,
) -> WeatherReport {
    generate_report(&mut rand::rng(), location, coordinate, unit)
}

/// Seven forecast days around `base_temperature`.
///
/// High and low are drawn independently around a per-day base, so a day's
/// high can end up below its low.
pub fn generate_forecast<R: RngExt + ?Sized>(rng: &mut R, base_temperature: i32) -> Vec<ForecastDay> {
    FORECAST_DAYS
        .iter()
        .map(|day| {
            let day_base = base_temperature + rng.random_range(FORECAST_DAY_OFFSET);
            let condition = pick(rng, &WeatherCondition::FORECAST);
            ForecastDay {
                day: (*day).to_string(),
                high: day_base + rng.random_range(FORECAST_HIGH_SPREAD),
                low: day_base - rng.random_range(FORECAST_LOW_SPREAD),
                condition,
            }
        })
        .collect()
}

/// Independently sampled pollutant readings
pub fn generate_air_quality<R: RngExt + ?Sized>(rng: &mut R) -> AirQuality {
    AirQuality {
        aqi: rng.random_range(AQI_RANGE),
        pm25: rng.random_range(PM25_RANGE),
        pm10: rng.random_range(PM10_RANGE),
        o3: rng.random_range(O3_RANGE),
        no2: rng.random_range(NO2_RANGE),
    }
}
