//! Weather Explorer - OpenWeatherMap proxy and weather client
//!
//! The proxy relays current-conditions and forecast lookups to the provider
//! so the API key stays server side. The client half acquires a location,
//! fetches both datasets through the proxy and projects them for display.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod telemetry;
pub mod upstream;
pub mod web;

// Re-export core types for public API
pub use config::ExplorerConfig;
pub use error::{ErrorKind, ExplorerError};
pub use models::{Coordinate, CurrentConditions, ForecastResponse, LocationReport};
pub use query::LocationQuery;
pub use upstream::{OpenWeatherClient, UpstreamEndpoint, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
