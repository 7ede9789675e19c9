//! View state and its transitions
//!
//! [`ViewState`] is an immutable record; [`ViewState::apply`] maps a state and
//! an [`Event`] to the next state. Every fetch carries a per-slot sequence
//! number and only the latest one issued for a slot may change it, so
//! responses that arrive out of order cannot overwrite newer data.

use serde::{Deserialize, Serialize};

use super::units::TemperatureUnit;
use crate::models::{Coordinate, LocationReport};

pub const SELECTED_FETCH_ERROR: &str = "Could not fetch data. Please try again.";

/// Independent data buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotId {
    /// The user's own location
    Own,
    /// The last location picked on the map
    Selected,
}

/// Views selectable from the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    #[default]
    MyLocation,
    Selected,
    Map,
}

/// Data held for one location: the last report or the error that replaced it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot {
    /// Current conditions and forecast from the last accepted fetch
    pub report: Option<LocationReport>,
    /// Message shown instead of a report after a failed fetch
    pub error: Option<String>,
    /// A fetch is in flight
    pub loading: bool,
    /// Latest sequence number issued for this slot
    pub latest_seq: u64,
}

impl Slot {
    fn accepts(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }
}

/// Input to [`ViewState::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Own position is known; `advisory` is set when it is the fallback
    LocationAcquired {
        coordinate: Coordinate,
        advisory: Option<String>,
    },
    /// A fetch numbered `seq` was issued for `slot`
    FetchStarted {
        slot: SlotId,
        seq: u64,
        coordinate: Coordinate,
    },
    /// Both lookups for `coordinate` succeeded
    FetchSucceeded {
        slot: SlotId,
        seq: u64,
        coordinate: Coordinate,
        report: Box<LocationReport>,
    },
    /// Either lookup failed; `message` is the failure text
    FetchFailed {
        slot: SlotId,
        seq: u64,
        message: String,
    },
    /// User picked a tab
    TabSelected(Tab),
    /// User flipped between Celsius and Fahrenheit
    UnitToggled,
}

/// Everything one user's view shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Weather at the user's own position
    pub own: Slot,
    /// Weather at the last point picked on the map
    pub selected: Slot,
    /// Own position, from geolocation or the fallback
    pub location: Option<Coordinate>,
    /// Position of the report held in the selected slot
    pub selected_location: Option<Coordinate>,
    /// Tab currently shown
    pub active_tab: Tab,
    /// Display unit; stored values stay metric
    pub unit: TemperatureUnit,
    /// Non-fatal notice, e.g. that the fallback location is in use
    pub advisory: Option<String>,
}

impl ViewState {
    #[must_use]
    pub fn slot(&self, id: SlotId) -> &Slot {
        match id {
            SlotId::Own => &self.own,
            SlotId::Selected => &self.selected,
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> &mut Slot {
        match id {
            SlotId::Own => &mut self.own,
            SlotId::Selected => &mut self.selected,
        }
    }

    /// Sequence number to attach to the next fetch for `slot`
    #[must_use]
    pub fn next_seq(&self, slot: SlotId) -> u64 {
        self.slot(slot).latest_seq + 1
    }

    /// Whether the selected-location tab can be shown
    #[must_use]
    pub fn selected_tab_enabled(&self) -> bool {
        self.selected.report.is_some()
    }

    /// True while the slot behind the active tab is loading
    #[must_use]
    pub fn is_loading(&self) -> bool {
        match self.active_tab {
            Tab::MyLocation => self.own.loading,
            Tab::Selected | Tab::Map => self.selected.loading,
        }
    }

    /// Error to show for the active tab
    #[must_use]
    pub fn active_error(&self) -> Option<&str> {
        match self.active_tab {
            Tab::MyLocation => self.own.error.as_deref(),
            Tab::Selected | Tab::Map => self.selected.error.as_deref(),
        }
    }

    #[must_use]
    pub fn apply(mut self, event: Event) -> Self {
        match event {
            Event::LocationAcquired {
                coordinate,
                advisory,
            } => {
                self.location = Some(coordinate);
                self.advisory = advisory;
            }
            Event::FetchStarted { slot, seq, .. } => {
                let target = self.slot_mut(slot);
                if seq > target.latest_seq {
                    target.latest_seq = seq;
                    target.loading = true;
                    if slot == SlotId::Selected {
                        target.error = None;
                    }
                }
            }
            Event::FetchSucceeded {
                slot,
                seq,
                coordinate,
                report,
            } => {
                let target = self.slot_mut(slot);
                if !target.accepts(seq) {
                    tracing::debug!("Discarding stale {:?} response #{}", slot, seq);
                    return self;
                }
                target.report = Some(*report);
                target.error = None;
                target.loading = false;
                if slot == SlotId::Selected {
                    self.selected_location = Some(coordinate);
                    self.active_tab = Tab::Selected;
                }
            }
            Event::FetchFailed { slot, seq, message } => {
                let target = self.slot_mut(slot);
                if !target.accepts(seq) {
                    tracing::debug!("Discarding stale {:?} failure #{}", slot, seq);
                    return self;
                }
                target.report = None;
                target.loading = false;
                target.error = Some(match slot {
                    SlotId::Own => format!("Error fetching data: {message}"),
                    SlotId::Selected => SELECTED_FETCH_ERROR.to_string(),
                });
            }
            Event::TabSelected(tab) => {
                if tab != Tab::Selected || self.selected_tab_enabled() {
                    self.active_tab = tab;
                }
            }
            Event::UnitToggled => {
                self.unit = self.unit.toggle();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::fixtures::forecast_json;
    use chrono::NaiveDate;

    fn report(name: &str, temp: f64) -> Box<LocationReport> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        Box::new(LocationReport {
            current: serde_json::from_value(serde_json::json!({
                "name": name,
                "main": { "temp": temp },
                "wind": { "speed": 2.0 }
            }))
            .unwrap(),
            forecast: serde_json::from_value(forecast_json(start, 5)).unwrap(),
        })
    }

    fn here() -> Coordinate {
        Coordinate::new(51.5, -0.12)
    }

    fn started(state: ViewState, slot: SlotId) -> (ViewState, u64) {
        let seq = state.next_seq(slot);
        let state = state.apply(Event::FetchStarted {
            slot,
            seq,
            coordinate: here(),
        });
        (state, seq)
    }

    #[test]
    fn test_success_stores_report() {
        let (state, seq) = started(ViewState::default(), SlotId::Own);
        assert!(state.own.loading);

        let state = state.apply(Event::FetchSucceeded {
            slot: SlotId::Own,
            seq,
            coordinate: here(),
            report: report("London", 12.0),
        });

        assert!(!state.own.loading);
        assert_eq!(state.own.report.as_ref().unwrap().current.name, "London");
        assert_eq!(state.active_tab, Tab::MyLocation);
        assert!(state.selected.report.is_none());
    }

    #[test]
    fn test_selected_success_switches_tab() {
        let (state, seq) = started(ViewState::default(), SlotId::Selected);
        let state = state.apply(Event::FetchSucceeded {
            slot: SlotId::Selected,
            seq,
            coordinate: here(),
            report: report("Paris", 15.0),
        });

        assert_eq!(state.active_tab, Tab::Selected);
        assert_eq!(state.selected_location, Some(here()));
        assert!(state.own.report.is_none());
    }

    #[test]
    fn test_failure_clears_slot() {
        let (state, seq) = started(ViewState::default(), SlotId::Selected);
        let state = state.apply(Event::FetchSucceeded {
            slot: SlotId::Selected,
            seq,
            coordinate: here(),
            report: report("Paris", 15.0),
        });

        let (state, seq) = started(state, SlotId::Selected);
        let state = state.apply(Event::FetchFailed {
            slot: SlotId::Selected,
            seq,
            message: "timeout".into(),
        });

        assert!(state.selected.report.is_none());
        assert_eq!(state.selected.error.as_deref(), Some(SELECTED_FETCH_ERROR));
        assert!(!state.selected.loading);
    }

    #[test]
    fn test_own_failure_message() {
        let (state, seq) = started(ViewState::default(), SlotId::Own);
        let state = state.apply(Event::FetchFailed {
            slot: SlotId::Own,
            seq,
            message: "Request failed with status code 500".into(),
        });
        assert_eq!(
            state.own.error.as_deref(),
            Some("Error fetching data: Request failed with status code 500")
        );
        assert!(state.selected.error.is_none());
    }

    #[test]
    fn test_stale_response_discarded() {
        let (state, first) = started(ViewState::default(), SlotId::Selected);
        let (state, second) = started(state, SlotId::Selected);
        assert!(second > first);

        let state = state.apply(Event::FetchSucceeded {
            slot: SlotId::Selected,
            seq: second,
            coordinate: Coordinate::new(48.85, 2.35),
            report: report("Paris", 15.0),
        });
        let state = state.apply(Event::FetchSucceeded {
            slot: SlotId::Selected,
            seq: first,
            coordinate: here(),
            report: report("London", 12.0),
        });

        assert_eq!(state.selected.report.as_ref().unwrap().current.name, "Paris");
        assert_eq!(state.selected_location, Some(Coordinate::new(48.85, 2.35)));
    }

    #[test]
    fn test_stale_failure_does_not_clear_newer_data() {
        let (state, first) = started(ViewState::default(), SlotId::Selected);
        let (state, second) = started(state, SlotId::Selected);
        let state = state
            .apply(Event::FetchSucceeded {
                slot: SlotId::Selected,
                seq: second,
                coordinate: here(),
                report: report("Paris", 15.0),
            })
            .apply(Event::FetchFailed {
                slot: SlotId::Selected,
                seq: first,
                message: "boom".into(),
            });

        assert!(state.selected.report.is_some());
        assert!(state.selected.error.is_none());
    }

    #[test]
    fn test_selected_tab_disabled_without_data() {
        let state = ViewState::default().apply(Event::TabSelected(Tab::Selected));
        assert_eq!(state.active_tab, Tab::MyLocation);

        let state = state.apply(Event::TabSelected(Tab::Map));
        assert_eq!(state.active_tab, Tab::Map);
    }

    #[test]
    fn test_tab_switch_keeps_reports() {
        let (state, seq) = started(ViewState::default(), SlotId::Own);
        let state = state
            .apply(Event::FetchSucceeded {
                slot: SlotId::Own,
                seq,
                coordinate: here(),
                report: report("London", 12.0),
            })
            .apply(Event::TabSelected(Tab::Map))
            .apply(Event::TabSelected(Tab::MyLocation));

        assert!(state.own.report.is_some());
        assert_eq!(state.own.latest_seq, seq);
    }

    #[test]
    fn test_unit_toggle_leaves_canonical_values() {
        let (state, seq) = started(ViewState::default(), SlotId::Own);
        let state = state
            .apply(Event::FetchSucceeded {
                slot: SlotId::Own,
                seq,
                coordinate: here(),
                report: report("London", 12.0),
            })
            .apply(Event::UnitToggled)
            .apply(Event::UnitToggled)
            .apply(Event::UnitToggled);

        assert_eq!(state.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(state.own.report.as_ref().unwrap().current.main.temp, 12.0);
    }

    #[test]
    fn test_location_acquired_sets_advisory() {
        let state = ViewState::default().apply(Event::LocationAcquired {
            coordinate: here(),
            advisory: Some("fallback".into()),
        });
        assert_eq!(state.location, Some(here()));
        assert_eq!(state.advisory.as_deref(), Some("fallback"));
    }

    #[test]
    fn test_slots_are_independent() {
        let (state, own_seq) = started(ViewState::default(), SlotId::Own);
        let (state, selected_seq) = started(state, SlotId::Selected);
        let state = state.apply(Event::FetchFailed {
            slot: SlotId::Selected,
            seq: selected_seq,
            message: "boom".into(),
        });

        assert!(state.own.loading);
        assert!(state.own.error.is_none());

        let state = state.apply(Event::FetchSucceeded {
            slot: SlotId::Own,
            seq: own_seq,
            coordinate: here(),
            report: report("London", 12.0),
        });
        assert!(state.own.report.is_some());
        assert!(state.selected.error.is_some());
    }
}
