//! 5-day / 3-hour forecast as returned by the OpenWeatherMap `forecast` endpoint

use serde::{Deserialize, Serialize};

use super::weather::{Condition, Coord, MainReadings, Wind};

/// One 3-hour forecast step
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Step time, Unix seconds
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Wind,
    /// Step time as `YYYY-MM-DD HH:MM:SS` (UTC)
    pub dt_txt: String,
}

/// City block of a forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coord: Option<Coord>,
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// Ordered sequence of 3-hour steps spanning 5 days
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    #[serde(default)]
    pub city: Option<ForecastCity>,
}
