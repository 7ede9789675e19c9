//! Data models for Weather Explorer
//!
//! - Location: client-side coordinate pair
//! - Weather: current-conditions snapshot
//! - Forecast: 5-day / 3-hour forecast list

pub mod forecast;
pub mod location;
pub mod weather;

pub use forecast::{ForecastCity, ForecastEntry, ForecastResponse};
pub use location::Coordinate;
pub use weather::{Condition, Coord, CurrentConditions, MainReadings, SystemInfo, Wind};

/// A current-conditions snapshot and the forecast for the same location,
/// fetched together.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocationReport {
    pub current: CurrentConditions,
    pub forecast: ForecastResponse,
}
