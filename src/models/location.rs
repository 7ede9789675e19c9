//! Coordinate model used by the client side

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Render as the `lat,lon` query form accepted by the proxy
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }

    /// Format coordinates for display
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }

    /// Parse `lat,lon` text with finite numeric components
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let (lat, lon) = input.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let lon = lon.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self::new(lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_form() {
        let coordinate = Coordinate::new(40.7128, -74.006);
        assert_eq!(coordinate.to_query(), "40.7128,-74.006");
    }

    #[test]
    fn test_format_coordinates() {
        let coordinate = Coordinate::new(46.818_234, 8.227_456);
        assert_eq!(coordinate.format_coordinates(), "46.8182, 8.2275");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Coordinate::parse("51.5, -0.12"), Some(Coordinate::new(51.5, -0.12)));
        assert_eq!(Coordinate::parse("51.5"), None);
        assert_eq!(Coordinate::parse("north,south"), None);
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert_eq!(Coordinate::parse("NaN,inf"), None);
        assert_eq!(Coordinate::parse("51.5,-infinity"), None);
        assert_eq!(Coordinate::parse("nan,0"), None);
    }
}
