//! Daily forecast selection

use chrono::NaiveDateTime;

use crate::models::ForecastEntry;

/// Timestamp fragment that marks the one entry per day shown as a card
pub const MIDDAY_MARKER: &str = "12:00:00";

/// Keep the midday entries of a 3-hour series, in their original order.
///
/// Applying this twice gives the same result as applying it once.
#[must_use]
pub fn midday_entries(list: &[ForecastEntry]) -> Vec<&ForecastEntry> {
    list.iter()
        .filter(|entry| entry.dt_txt.contains(MIDDAY_MARKER))
        .collect()
}

/// Format a `YYYY-MM-DD HH:MM:SS` stamp as e.g. `Sat, Jan 6`.
///
/// Text that does not parse is returned unchanged.
#[must_use]
pub fn format_forecast_day(dt_txt: &str) -> String {
    NaiveDateTime::parse_from_str(dt_txt, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.format("%a, %b %-d").to_string())
        .unwrap_or_else(|_| dt_txt.to_string())
}
