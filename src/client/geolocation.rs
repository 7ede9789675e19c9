//! Location acquisition with a fixed fallback

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Coordinate;

/// Coordinate used when the platform cannot or will not report a position (New York City)
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    lat: 40.7128,
    lon: -74.0060,
};

pub const DENIED_ADVISORY: &str = "Location access denied. Using default location.";
pub const UNSUPPORTED_ADVISORY: &str =
    "Geolocation is not supported by your browser. Using default location.";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    Denied,
    #[error("geolocation not supported")]
    Unsupported,
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Platform location capability
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Outcome of a location request: always a coordinate, plus an advisory when it is the fallback
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredLocation {
    pub coordinate: Coordinate,
    pub advisory: Option<String>,
}

/// Ask the provider once; on any failure use [`FALLBACK_COORDINATE`] and explain why.
pub async fn acquire_location(provider: &dyn LocationProvider) -> AcquiredLocation {
    match provider.current_position().await {
        Ok(coordinate) => AcquiredLocation {
            coordinate,
            advisory: None,
        },
        Err(e) => {
            tracing::warn!("Using fallback location: {}", e);
            let advisory = match e {
                GeolocationError::Unsupported => UNSUPPORTED_ADVISORY,
                GeolocationError::Denied | GeolocationError::Unavailable(_) => DENIED_ADVISORY,
            };
            AcquiredLocation {
                coordinate: FALLBACK_COORDINATE,
                advisory: Some(advisory.to_string()),
            }
        }
    }
}

/// Provider backed by a fixed, optional position; `None` reports `Unsupported`
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocation(pub Option<Coordinate>);

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.0.ok_or(GeolocationError::Unsupported)
    }
}
