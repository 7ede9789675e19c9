//! Display projections of weather data
//!
//! Cards are rebuilt from canonical metric values on every call, so the unit
//! preference is applied exactly once per render and stored reports never change.

use std::fmt::{self, Write as _};

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::forecast::{format_forecast_day, midday_entries};
use super::state::{Tab, ViewState};
use super::units::{TemperatureUnit, format_temperature, format_wind_speed};
use crate::models::{Condition, CurrentConditions, ForecastEntry, ForecastResponse, MainReadings};

/// Card background band, chosen from the Celsius temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    Hot,
    Warm,
    Mild,
    Cold,
}

impl TemperatureBand {
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        if celsius > 30.0 {
            Self::Hot
        } else if celsius > 20.0 {
            Self::Warm
        } else if celsius > 10.0 {
            Self::Mild
        } else {
            Self::Cold
        }
    }
}

/// Short label for a provider condition group
#[must_use]
pub fn condition_label(main: &str) -> &'static str {
    match main {
        "Clear" => "Clear Sky",
        "Clouds" => "Cloudy",
        "Rain" => "Rainy",
        "Snow" => "Snowy",
        "Fog" => "Foggy",
        "Wind" => "Windy",
        _ => "Clouds",
    }
}

/// Format a Unix timestamp as `HH:MM` local to the given UTC offset
#[must_use]
pub fn format_clock(unix_seconds: i64, offset_seconds: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(offset_seconds)?;
    let at = DateTime::<Utc>::from_timestamp(unix_seconds, 0)?.with_timezone(&offset);
    Some(at.format("%H:%M").to_string())
}

/// Everything one weather card shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCardView {
    pub title: String,
    pub temperature: String,
    pub unit_symbol: &'static str,
    pub condition: &'static str,
    pub description: String,
    pub humidity: Option<String>,
    pub wind: String,
    pub pressure: Option<String>,
    pub feels_like: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub band: TemperatureBand,
}

impl WeatherCardView {
    pub fn from_current(current: &CurrentConditions, unit: TemperatureUnit) -> Self {
        let title = match current.country() {
            Some(country) => format!("{}, {}", current.name, country),
            None => current.name.clone(),
        };
        let offset = current.timezone.unwrap_or(0);
        let (sunrise, sunset) = match current.solar_events() {
            Some((rise, set)) => (format_clock(rise, offset), format_clock(set, offset)),
            None => (None, None),
        };

        Self {
            title,
            sunrise,
            sunset,
            ..Self::from_readings(
                &current.main,
                current.primary_condition(),
                current.wind.speed,
                unit,
            )
        }
    }

    /// Card for one forecast step; titled with its day
    pub fn from_forecast_entry(entry: &ForecastEntry, unit: TemperatureUnit) -> Self {
        Self {
            title: format_forecast_day(&entry.dt_txt),
            ..Self::from_readings(&entry.main, entry.weather.first(), entry.wind.speed, unit)
        }
    }

    fn from_readings(
        main: &MainReadings,
        condition: Option<&Condition>,
        wind_mps: f64,
        unit: TemperatureUnit,
    ) -> Self {
        Self {
            title: String::new(),
            temperature: format_temperature(main.temp, unit),
            unit_symbol: unit.symbol(),
            condition: condition_label(condition.map_or("", |c| c.main.as_str())),
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            humidity: main.humidity.map(|h| format!("{h}%")),
            wind: format!("{} {}", format_wind_speed(wind_mps, unit), unit.wind_label()),
            pressure: main.pressure.map(|p| format!("{p} hPa")),
            feels_like: main
                .feels_like
                .map(|f| format!("{}{}", format_temperature(f, unit), unit.symbol())),
            sunrise: None,
            sunset: None,
            band: TemperatureBand::from_celsius(main.temp),
        }
    }
}

impl fmt::Display for WeatherCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "   🌡️ {}{}  {} ({})",
            self.temperature, self.unit_symbol, self.condition, self.description
        )?;
        if let Some(humidity) = &self.humidity {
            writeln!(f, "   💧 Humidity: {humidity}")?;
        }
        writeln!(f, "   💨 Wind: {}", self.wind)?;
        if let Some(pressure) = &self.pressure {
            writeln!(f, "   📊 Pressure: {pressure}")?;
        }
        if let Some(feels_like) = &self.feels_like {
            writeln!(f, "   🤒 Feels like: {feels_like}")?;
        }
        if let (Some(sunrise), Some(sunset)) = (&self.sunrise, &self.sunset) {
            writeln!(f, "   🌅 Sunrise: {sunrise}  🌇 Sunset: {sunset}")?;
        }
        Ok(())
    }
}

/// Forecast day card, titled with its day and without solar events
pub type ForecastCardView = WeatherCardView;

/// One card per day, from the midday entries of the forecast
#[must_use]
pub fn forecast_cards(forecast: &ForecastResponse, unit: TemperatureUnit) -> Vec<ForecastCardView> {
    midday_entries(&forecast.list)
        .into_iter()
        .map(|entry| WeatherCardView::from_forecast_entry(entry, unit))
        .collect()
}

/// Text for sharing the current conditions
#[must_use]
pub fn share_message(card: &WeatherCardView) -> String {
    format!(
        "Weather Update: {} is currently {}{} with {}.",
        card.title, card.temperature, card.unit_symbol, card.description
    )
}

/// Terminal rendering of the active tab
#[must_use]
pub fn render_text(state: &ViewState) -> String {
    let mut out = String::new();

    if let Some(advisory) = &state.advisory {
        let _ = writeln!(out, "ℹ️  {advisory}");
    }
    if let Some(error) = state.active_error() {
        let _ = writeln!(out, "❌ {error}");
    }
    if state.is_loading() {
        let _ = writeln!(out, "⏳ Loading...");
        return out;
    }

    match state.active_tab {
        Tab::MyLocation => render_slot(&mut out, "Current Location Weather", state, false),
        Tab::Selected => render_slot(&mut out, "Selected Location Weather", state, true),
        Tab::Map => render_map(&mut out, state),
    }
    out
}

fn render_slot(out: &mut String, heading: &str, state: &ViewState, selected: bool) {
    let slot = if selected { &state.selected } else { &state.own };
    let Some(report) = &slot.report else {
        return;
    };

    let _ = writeln!(out, "== {heading} ==");
    let _ = write!(out, "{}", WeatherCardView::from_current(&report.current, state.unit));

    let cards = forecast_cards(&report.forecast, state.unit);
    if !cards.is_empty() {
        let _ = writeln!(out, "\n== 5-Day Forecast ==");
        for card in cards {
            let _ = write!(out, "{card}");
        }
    }
}

fn render_map(out: &mut String, state: &ViewState) {
    let _ = writeln!(out, "== Interactive Weather Map ==");
    if let Some(location) = &state.location {
        let _ = writeln!(out, "📍 Your current location: {}", location.format_coordinates());
    }
    if let Some(selected) = &state.selected_location {
        let _ = write!(out, "📌 Selected location: {}", selected.format_coordinates());
        if let Some(report) = &state.selected.report {
            let card = WeatherCardView::from_current(&report.current, TemperatureUnit::Celsius);
            let _ = write!(
                out,
                " - {}: {}{}, {}",
                card.title, card.temperature, card.unit_symbol, card.description
            );
        }
        let _ = writeln!(out);
    }
}
