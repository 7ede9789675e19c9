//! Location query parsing
//!
//! A query is either a free-text place name or a `lat,lon` pair. The form is
//! chosen by the presence of a comma; coordinate components are relayed as
//! text so the provider sees exactly what the caller sent.

use std::fmt;

use crate::{ExplorerError, Result};

/// A parsed location query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    /// Place name (city, region, etc.)
    Name(String),
    /// Coordinate pair, split on the first comma
    Coordinates { lat: String, lon: String },
}

impl LocationQuery {
    /// Parse raw query input. Empty input is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(ExplorerError::invalid_query("city parameter must not be empty"));
        }

        match input.split_once(',') {
            Some((lat, lon)) => Ok(Self::Coordinates {
                lat: lat.to_string(),
                lon: lon.to_string(),
            }),
            None => Ok(Self::Name(input.to_string())),
        }
    }

    /// Parse an optional query parameter, treating absence like an empty value
    pub fn from_param(param: Option<&str>) -> Result<Self> {
        match param {
            Some(value) => Self::parse(value),
            None => Err(ExplorerError::invalid_query("missing city parameter")),
        }
    }

    #[must_use]
    pub fn is_coordinates(&self) -> bool {
        matches!(self, Self::Coordinates { .. })
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}
