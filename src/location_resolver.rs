//! Location Resolution Module
//!
//! Obtains the device position through a [`Geolocator`], falling back to a
//! fixed coordinate when the device has no geolocation capability or the
//! lookup fails. Resolution never fails.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::GeolocationConfig;
use crate::error::GeolocationError;
use crate::models::Coordinate;

/// Device geolocation capability: a single current-position query
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Resolve the current position.
///
/// `None` means the device exposes no geolocation capability. Errors from
/// the geolocator are logged and replaced by [`Coordinate::FALLBACK`].
pub async fn resolve_location(geolocator: Option<&dyn Geolocator>) -> Coordinate {
    let Some(geolocator) = geolocator else {
        debug!("No geolocation capability, using fallback location");
        return Coordinate::FALLBACK;
    };

    match geolocator.current_position().await {
        Ok(coordinate) => {
            debug!(
                "Resolved device position: ({}, {})",
                coordinate.latitude, coordinate.longitude
            );
            coordinate
        }
        Err(e) => {
            warn!("Geolocation error: {}, using fallback location", e);
            Coordinate::FALLBACK
        }
    }
}

/// Geolocator reporting a configured device position
#[derive(Debug, Clone)]
pub struct FixedGeolocator {
    position: Option<Coordinate>,
}

impl FixedGeolocator {
    #[must_use]
    pub fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.position.ok_or(GeolocationError::PositionUnavailable)
    }
}

/// Geolocator whose permission request is always refused
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGeolocator;

#[async_trait]
impl Geolocator for DeniedGeolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

/// Build the geolocation capability described by the configuration
#[must_use]
pub fn geolocator_from_config(config: &GeolocationConfig) -> Option<Arc<dyn Geolocator>> {
    if !config.enabled {
        return None;
    }
    Some(Arc::new(FixedGeolocator::new(config.position())))
}
