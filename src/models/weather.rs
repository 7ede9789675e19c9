//! Current-conditions snapshot as returned by the OpenWeatherMap `weather` endpoint
//!
//! Only the fields the client reads are modelled. Fields the provider omits
//! for some locations are `Option` so render code branches on presence.

use serde::{Deserialize, Serialize};

/// Position block of a snapshot
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// One weather condition (a snapshot usually carries exactly one)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Condition {
    /// Condition group, e.g. `Clear`, `Clouds`, `Rain`
    pub main: String,
    /// Human-readable description, e.g. `light rain`
    pub description: String,
    /// Provider icon id
    #[serde(default)]
    pub icon: Option<String>,
}

/// Temperature and atmosphere readings (metric: Celsius, hPa, percent)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

/// Wind readings (metric: m/s, degrees)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
    #[serde(default)]
    pub gust: Option<f64>,
}

/// System block: country and solar events as Unix seconds
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SystemInfo {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// A single point-in-time current-conditions payload
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coord: Option<Coord>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub sys: Option<SystemInfo>,
    /// Observation time, Unix seconds
    #[serde(default)]
    pub dt: i64,
    /// Shift from UTC in seconds
    #[serde(default)]
    pub timezone: Option<i32>,
}

impl CurrentConditions {
    /// The primary condition, if the provider sent one
    #[must_use]
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.sys.as_ref().and_then(|sys| sys.country.as_deref())
    }

    /// Sunrise and sunset, only when both are known
    #[must_use]
    pub fn solar_events(&self) -> Option<(i64, i64)> {
        let sys = self.sys.as_ref()?;
        Some((sys.sunrise?, sys.sunset?))
    }
}
