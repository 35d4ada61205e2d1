//! Weather data-fetch port
//!
//! The dashboard asks a [`WeatherSource`] for reports instead of calling the
//! generator directly. The simulated source waits for a configured latency
//! before generating, standing in for a network round trip.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::config::SimulationConfig;
use crate::generator;
use crate::models::{Coordinate, UnitSystem, WeatherReport};

/// Why a report is being fetched; selects the simulated latency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Free-text place search
    Search,
    /// Report for the resolved device position
    Located,
}

/// Parameters of a single report fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub label: String,
    pub coordinate: Option<Coordinate>,
    pub unit: UnitSystem,
    pub kind: FetchKind,
}

impl ReportRequest {
    /// Request for a searched place name
    pub fn search<S: Into<String>>(label: S, unit: UnitSystem) -> Self {
        Self {
            label: label.into(),
            coordinate: None,
            unit,
            kind: FetchKind::Search,
        }
    }

    /// Request for the device position
    #[must_use]
    pub fn located(coordinate: Coordinate, unit: UnitSystem) -> Self {
        Self {
            label: CURRENT_LOCATION_LABEL.to_string(),
            coordinate: Some(coordinate),
            unit,
            kind: FetchKind::Located,
        }
    }
}

/// Label shown for reports generated from the device position
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// Anything able to produce a weather report for a request
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, request: ReportRequest) -> WeatherReport;
}

/// Generates random reports after an artificial delay
#[derive(Debug, Clone)]
pub struct SimulatedWeatherSource {
    search_delay: Duration,
    locate_delay: Duration,
}

impl SimulatedWeatherSource {
    #[must_use]
    pub fn new(search_delay: Duration, locate_delay: Duration) -> Self {
        Self {
            search_delay,
            locate_delay,
        }
    }

    /// Source that answers immediately
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            Duration::from_millis(config.search_delay_ms),
            Duration::from_millis(config.locate_delay_ms),
        )
    }

    /// Latency applied to a request of the given kind
    #[must_use]
    pub fn delay_for(&self, kind: FetchKind) -> Duration {
        match kind {
            FetchKind::Search => self.search_delay,
            FetchKind::Located => self.locate_delay,
        }
    }
}

impl Default for SimulatedWeatherSource {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[async_trait]
impl WeatherSource for SimulatedWeatherSource {
    #[instrument(skip(self), fields(label = %request.label, unit = %request.unit))]
    async fn fetch(&self, request: ReportRequest) -> WeatherReport {
        let delay = self.delay_for(request.kind);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        generator::generate_report_with_thread_rng(&request.label, request.coordinate, request.unit)
    }
}
