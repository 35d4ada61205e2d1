//! Dashboard session
//!
//! Owns the session state (selected unit system, last resolved location and
//! latest report) and drives the locate / search / unit-switch flows:
//! fetch a report through the [`WeatherSource`], render it and replace the
//! content of the [`Screen`].
//!
//! Operations are not cancellable. When two fetches overlap, whichever
//! completes last overwrites the display.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument};

use crate::config::DashboardConfig;
use crate::location_resolver::{Geolocator, geolocator_from_config, resolve_location};
use crate::models::{Coordinate, UnitSystem, WeatherReport};
use crate::render::{self, DisplayDocument};
use crate::weather::{ReportRequest, SimulatedWeatherSource, WeatherSource};

/// Display surface with replace-all-content semantics
#[derive(Debug)]
pub struct Screen {
    content: watch::Sender<DisplayDocument>,
}

impl Screen {
    #[must_use]
    pub fn new(initial: DisplayDocument) -> Self {
        let (content, _) = watch::channel(initial);
        Self { content }
    }

    /// Replace whatever is currently shown
    pub fn show(&self, document: DisplayDocument) {
        self.content.send_replace(document);
    }

    /// Snapshot of the current content
    #[must_use]
    pub fn current(&self) -> DisplayDocument {
        self.content.borrow().clone()
    }

    /// Receiver notified on every content replacement
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DisplayDocument> {
        self.content.subscribe()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(render::locating_document())
    }
}

/// Mutable session state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub unit: UnitSystem,
    /// Last resolved device position, replaced wholesale on every locate
    pub location: Option<Coordinate>,
    pub report: Option<Arc<WeatherReport>>,
}

pub struct Dashboard {
    source: Arc<dyn WeatherSource>,
    geolocator: Option<Arc<dyn Geolocator>>,
    screen: Screen,
    state: Mutex<SessionState>,
}

impl Dashboard {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        geolocator: Option<Arc<dyn Geolocator>>,
        unit: UnitSystem,
    ) -> Self {
        Self {
            source,
            geolocator,
            screen: Screen::default(),
            state: Mutex::new(SessionState {
                unit,
                ..SessionState::default()
            }),
        }
    }

    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            Arc::new(SimulatedWeatherSource::from_config(&config.simulation)),
            geolocator_from_config(&config.geolocation),
            config.defaults.unit,
        )
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn session(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn unit(&self) -> UnitSystem {
        self.state.lock().await.unit
    }

    pub async fn location(&self) -> Option<Coordinate> {
        self.state.lock().await.location
    }

    pub async fn latest_report(&self) -> Option<Arc<WeatherReport>> {
        self.state.lock().await.report.clone()
    }

    /// Resolve the device position, remember it, and show its report
    #[instrument(skip(self))]
    pub async fn locate(&self) -> Arc<WeatherReport> {
        let coordinate = resolve_location(self.geolocator.as_deref()).await;
        let unit = {
            let mut state = self.state.lock().await;
            state.location = Some(coordinate);
            state.unit
        };
        info!("Location set to {}", coordinate.format_coordinates());
        self.fetch_and_show(ReportRequest::located(coordinate, unit)).await
    }

    /// Show a report for a free-text place name.
    ///
    /// Blank input is ignored: nothing is fetched and the display is left
    /// untouched.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Option<Arc<WeatherReport>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring empty search");
            return None;
        }

        let unit = {
            let state = self.state.lock().await;
            self.screen.show(render::loading_document());
            state.unit
        };
        Some(self.fetch_and_show(ReportRequest::search(query, unit)).await)
    }

    /// Select a unit system. With a known location the report is regenerated
    /// once for that location; the position is not resolved again.
    #[instrument(skip(self))]
    pub async fn set_unit(&self, unit: UnitSystem) -> Option<Arc<WeatherReport>> {
        let location = {
            let mut state = self.state.lock().await;
            state.unit = unit;
            state.location
        };

        let coordinate = location?;
        Some(self.fetch_and_show(ReportRequest::located(coordinate, unit)).await)
    }

    async fn fetch_and_show(&self, request: ReportRequest) -> Arc<WeatherReport> {
        let report = Arc::new(self.source.fetch(request).await);
        let document = render::render(&report);

        // Stored report and screen change together so they never disagree
        let mut state = self.state.lock().await;
        state.report = Some(Arc::clone(&report));
        self.screen.show(document);
        drop(state);

        debug!("Displayed report for {}", report.location);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeolocationError;
    use crate::generator::temperature_range;
    use crate::location_resolver::{DeniedGeolocator, FixedGeolocator};
    use crate::weather::FetchKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSource {
        requests: std::sync::Mutex<Vec<ReportRequest>>,
    }

    impl RecordingSource {
        fn requests(&self) -> Vec<ReportRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherSource for RecordingSource {
        async fn fetch(&self, request: ReportRequest) -> WeatherReport {
            self.requests.lock().unwrap().push(request.clone());
            SimulatedWeatherSource::instant().fetch(request).await
        }
    }

    struct CountingGeolocator {
        calls: AtomicUsize,
        result: Result<Coordinate, GeolocationError>,
    }

    #[async_trait]
    impl Geolocator for CountingGeolocator {
        async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn dashboard_with(
        source: Arc<RecordingSource>,
        geolocator: Option<Arc<dyn Geolocator>>,
    ) -> Dashboard {
        Dashboard::new(source, geolocator, UnitSystem::Metric)
    }

    #[tokio::test]
    async fn test_locate_stores_position_and_shows_report() {
        let source = Arc::new(RecordingSource::default());
        let paris = Coordinate::new(48.8566, 2.3522);
        let dashboard = dashboard_with(
            source.clone(),
            Some(Arc::new(FixedGeolocator::new(Some(paris)))),
        );

        let report = dashboard.locate().await;

        assert_eq!(dashboard.location().await, Some(paris));
        assert_eq!(report.location, "Current Location");
        assert_eq!(report.coordinate, Some(paris));
        assert_eq!(dashboard.screen().current(), render::render(&report));
        assert_eq!(source.requests()[0].kind, FetchKind::Located);
    }

    #[tokio::test]
    async fn test_locate_with_denied_permission_uses_fallback() {
        let source = Arc::new(RecordingSource::default());
        let dashboard = dashboard_with(source, Some(Arc::new(DeniedGeolocator)));

        let report = dashboard.locate().await;

        assert_eq!(dashboard.location().await, Some(Coordinate::new(40.7128, -74.0060)));
        assert_eq!(report.coordinate, Some(Coordinate::FALLBACK));
    }

    struct SequenceGeolocator {
        positions: std::sync::Mutex<Vec<Coordinate>>,
    }

    #[async_trait]
    impl Geolocator for SequenceGeolocator {
        async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
            let mut positions = self.positions.lock().unwrap();
            if positions.is_empty() {
                Err(GeolocationError::PositionUnavailable)
            } else {
                Ok(positions.remove(0))
            }
        }
    }

    #[tokio::test]
    async fn test_second_locate_replaces_stored_position() {
        let source = Arc::new(RecordingSource::default());
        let lima = Coordinate::new(-12.0464, -77.0428);
        let seoul = Coordinate::new(37.5665, 126.978);
        let geolocator = Arc::new(SequenceGeolocator {
            positions: std::sync::Mutex::new(vec![lima, seoul]),
        });
        let dashboard = dashboard_with(source.clone(), Some(geolocator));

        dashboard.locate().await;
        assert_eq!(dashboard.location().await, Some(lima));

        let report = dashboard.locate().await;
        assert_eq!(dashboard.location().await, Some(seoul));
        assert_eq!(report.coordinate, Some(seoul));

        let report = dashboard.set_unit(UnitSystem::Imperial).await.unwrap();
        assert_eq!(report.coordinate, Some(seoul));
        let requests = source.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].coordinate, Some(seoul));
    }

    #[tokio::test]
    async fn test_unit_switch_regenerates_once_without_relocating() {
        let source = Arc::new(RecordingSource::default());
        let tokyo = Coordinate::new(35.6762, 139.6503);
        let geolocator = Arc::new(CountingGeolocator {
            calls: AtomicUsize::new(0),
            result: Ok(tokyo),
        });
        let dashboard = dashboard_with(source.clone(), Some(geolocator.clone()));

        dashboard.locate().await;
        let report = dashboard.set_unit(UnitSystem::Imperial).await.unwrap();

        assert_eq!(geolocator.calls.load(Ordering::SeqCst), 1);
        let requests = source.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].unit, UnitSystem::Imperial);
        assert_eq!(requests[1].coordinate, Some(tokyo));
        assert_eq!(report.units.temperature, "°F");
        assert!(temperature_range(UnitSystem::Imperial).contains(&report.current.temperature));
        assert_eq!(dashboard.unit().await, UnitSystem::Imperial);
    }

    #[tokio::test]
    async fn test_unit_switch_without_location_only_stores_unit() {
        let source = Arc::new(RecordingSource::default());
        let dashboard = dashboard_with(source.clone(), None);
        let before = dashboard.screen().current();

        assert!(dashboard.set_unit(UnitSystem::Imperial).await.is_none());

        assert_eq!(dashboard.unit().await, UnitSystem::Imperial);
        assert!(source.requests().is_empty());
        assert_eq!(dashboard.screen().current(), before);
    }

    #[tokio::test]
    async fn test_blank_search_is_a_no_op() {
        let source = Arc::new(RecordingSource::default());
        let dashboard = dashboard_with(source.clone(), None);
        dashboard.search("Madrid").await;
        let before = dashboard.screen().current();
        let mut changes = dashboard.screen().subscribe();
        changes.mark_unchanged();

        for query in ["", "   ", "\t\n"] {
            assert!(dashboard.search(query).await.is_none());
        }

        assert_eq!(source.requests().len(), 1);
        assert_eq!(dashboard.screen().current(), before);
        assert!(!changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_search_trims_and_does_not_touch_location() {
        let source = Arc::new(RecordingSource::default());
        let dashboard = dashboard_with(source.clone(), None);

        let report = dashboard.search("  Buenos Aires ").await.unwrap();

        assert_eq!(report.location, "Buenos Aires");
        assert_eq!(report.coordinate, None);
        assert_eq!(dashboard.location().await, None);
        assert_eq!(source.requests()[0].kind, FetchKind::Search);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_shows_loading_while_pending() {
        let dashboard = Arc::new(Dashboard::new(
            Arc::new(SimulatedWeatherSource::default()),
            None,
            UnitSystem::Metric,
        ));

        let pending = tokio::spawn({
            let dashboard = Arc::clone(&dashboard);
            async move { dashboard.search("Cairo").await }
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(dashboard.screen().current(), render::loading_document());

        let report = pending.await.unwrap().unwrap();
        assert_eq!(dashboard.screen().current(), render::render(&report));
    }

    struct LabelDelaySource;

    #[async_trait]
    impl WeatherSource for LabelDelaySource {
        async fn fetch(&self, request: ReportRequest) -> WeatherReport {
            let delay = if request.label == "Slow" { 2000 } else { 1000 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            SimulatedWeatherSource::instant().fetch(request).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_searches_last_completion_wins() {
        let dashboard = Dashboard::new(Arc::new(LabelDelaySource), None, UnitSystem::Metric);

        let (slow, fast) = tokio::join!(dashboard.search("Slow"), dashboard.search("Fast"));

        let slow = slow.unwrap();
        assert_eq!(fast.unwrap().location, "Fast");
        assert_eq!(dashboard.latest_report().await.unwrap().location, "Slow");
        assert_eq!(dashboard.screen().current(), render::render(&slow));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_stored_report_matches_screen_under_concurrent_searches() {
        let dashboard = Arc::new(Dashboard::new(
            Arc::new(SimulatedWeatherSource::instant()),
            None,
            UnitSystem::Metric,
        ));

        for round in 0..200 {
            let tasks: Vec<_> = (0..16)
                .map(|i| {
                    let dashboard = Arc::clone(&dashboard);
                    tokio::spawn(async move { dashboard.search(&format!("City {round}-{i}")).await })
                })
                .collect();
            for task in tasks {
                task.await.unwrap();
            }

            let latest = dashboard.latest_report().await.unwrap();
            assert_eq!(dashboard.screen().current(), render::render(&latest));
        }
    }

    #[test]
    fn test_from_config() {
        let mut config = DashboardConfig::default();
        config.defaults.unit = UnitSystem::Imperial;
        config.geolocation.enabled = false;
        let dashboard = Dashboard::from_config(&config);
        assert!(dashboard.geolocator.is_none());
        assert_eq!(dashboard.screen().current(), render::locating_document());
    }
}
