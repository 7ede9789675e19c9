//! Display unit conversion
//!
//! Canonical values are metric (Celsius, m/s) as returned by the provider.
//! Conversions here are display-only and always start from the canonical value.

use serde::{Deserialize, Serialize};

/// Miles per hour in one metre per second, as shown to users
pub const MPS_TO_MPH: f64 = 2.237;

/// Temperature unit preference; also selects the wind speed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    #[must_use]
    pub fn wind_label(self) -> &'static str {
        match self {
            Self::Celsius => "m/s",
            Self::Fahrenheit => "mph",
        }
    }

    /// Label for the toggle control, naming the unit it switches to
    #[must_use]
    pub fn switch_label(self) -> &'static str {
        match self.toggle() {
            Self::Celsius => "Switch to Celsius",
            Self::Fahrenheit => "Switch to Fahrenheit",
        }
    }
}

/// Convert a Celsius reading for display
#[must_use]
pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}

/// Convert a m/s wind reading for display
#[must_use]
pub fn convert_wind_speed(mps: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => mps,
        TemperatureUnit::Fahrenheit => mps * MPS_TO_MPH,
    }
}

/// One decimal, rounding the stored value itself; exact halves go away from zero
fn one_decimal(value: f64) -> String {
    // Only n.25 and n.75 are exact halves at one decimal; both make `value * 4` an odd integer
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && (value * 2.0).fract() != 0.0 {
        return format!("{:.1}", value + value.signum() * 0.025);
    }
    format!("{:.1}", value)
}

#[must_use]
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    one_decimal(convert_temperature(celsius, unit))
}

#[must_use]
pub fn format_wind_speed(mps: f64, unit: TemperatureUnit) -> String {
    one_decimal(convert_wind_speed(mps, unit))
}
