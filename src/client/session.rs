//! Client session: drives fetches and applies their results to the view state

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::geolocation::{LocationProvider, acquire_location};
use super::proxy::ProxyClient;
use super::state::{Event, SlotId, Tab, ViewState};
use crate::models::Coordinate;

/// Shared handle to one user's view state; clones share the state.
#[derive(Debug, Clone)]
pub struct ExplorerSession {
    proxy: ProxyClient,
    state: Arc<Mutex<ViewState>>,
}

impl ExplorerSession {
    #[must_use]
    pub fn new(proxy: ProxyClient) -> Self {
        Self {
            proxy,
            state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Snapshot of the current view state
    pub async fn state(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    async fn dispatch(&self, event: Event) {
        let mut state = self.state.lock().await;
        *state = state.clone().apply(event);
    }

    /// Acquire the user's location once and load its weather into the own slot.
    pub async fn start(&self, provider: &dyn LocationProvider) {
        let acquired = acquire_location(provider).await;
        if let Some(advisory) = &acquired.advisory {
            warn!("{}", advisory);
        }
        self.dispatch(Event::LocationAcquired {
            coordinate: acquired.coordinate,
            advisory: acquired.advisory,
        })
        .await;

        self.load(SlotId::Own, acquired.coordinate).await;
    }

    /// Map interaction: load the weather for `coordinate` into the selected slot.
    pub async fn select_point(&self, coordinate: Coordinate) {
        info!("Selected point {}", coordinate.format_coordinates());
        self.load(SlotId::Selected, coordinate).await;
    }

    pub async fn select_tab(&self, tab: Tab) {
        self.dispatch(Event::TabSelected(tab)).await;
    }

    pub async fn toggle_unit(&self) {
        self.dispatch(Event::UnitToggled).await;
    }

    async fn load(&self, slot: SlotId, coordinate: Coordinate) {
        let seq = {
            let mut state = self.state.lock().await;
            let seq = state.next_seq(slot);
            *state = state.clone().apply(Event::FetchStarted {
                slot,
                seq,
                coordinate,
            });
            seq
        };

        let event = match self.proxy.fetch_report(coordinate).await {
            Ok(report) => Event::FetchSucceeded {
                slot,
                seq,
                coordinate,
                report: Box::new(report),
            },
            Err(e) => {
                warn!("{:?} fetch #{} failed: {}", slot, seq, e);
                Event::FetchFailed {
                    slot,
                    seq,
                    message: e.to_string(),
                }
            }
        };
        self.dispatch(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::geolocation::{DENIED_ADVISORY, FALLBACK_COORDINATE, StaticLocation};
    use crate::client::state::SELECTED_FETCH_ERROR;
    use crate::models::forecast::fixtures::forecast_json;
    use chrono::NaiveDate;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current(name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "main": { "temp": 12.0 },
            "wind": { "speed": 2.0 }
        })
    }

    fn forecast() -> serde_json::Value {
        forecast_json(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(), 5)
    }

    async fn mount_location(server: &MockServer, city: &str, name: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .and(query_param("city", city))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(current(name))
                    .set_delay(delay),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/forecast"))
            .and(query_param("city", city))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(forecast())
                    .set_delay(delay),
            )
            .mount(server)
            .await;
    }

    fn session(server: &MockServer) -> ExplorerSession {
        ExplorerSession::new(ProxyClient::new(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn test_start_with_unsupported_geolocation_uses_fallback() {
        let server = MockServer::start().await;
        mount_location(&server, "40.7128,-74.006", "New York", Duration::ZERO).await;

        let session = session(&server);
        session.start(&StaticLocation(None)).await;
        let state = session.state().await;

        assert_eq!(state.location, Some(FALLBACK_COORDINATE));
        assert!(state.advisory.is_some());
        assert_ne!(state.advisory.as_deref(), Some(DENIED_ADVISORY));
        assert_eq!(state.own.report.unwrap().current.name, "New York");
    }

    #[tokio::test]
    async fn test_select_point_failure_clears_and_reports() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current("Paris")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/forecast"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "error": "boom", "kind": "upstream" })),
            )
            .mount(&server)
            .await;

        let session = session(&server);
        session.select_point(Coordinate::new(48.85, 2.35)).await;
        let state = session.state().await;

        assert!(state.selected.report.is_none());
        assert_eq!(state.selected.error.as_deref(), Some(SELECTED_FETCH_ERROR));
        assert_eq!(state.active_tab, Tab::MyLocation);
        assert!(state.selected_location.is_none());
    }

    #[tokio::test]
    async fn test_rapid_clicks_resolve_to_latest() {
        let server = MockServer::start().await;
        mount_location(&server, "51.5,-0.12", "London", Duration::from_millis(400)).await;
        mount_location(&server, "48.85,2.35", "Paris", Duration::ZERO).await;

        let session = session(&server);
        let slow = {
            let session = session.clone();
            tokio::spawn(async move { session.select_point(Coordinate::new(51.5, -0.12)).await })
        };
        // Let the first click register its sequence number before the second
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.select_point(Coordinate::new(48.85, 2.35)).await;
        slow.await.unwrap();

        let state = session.state().await;
        assert_eq!(state.selected.report.unwrap().current.name, "Paris");
        assert_eq!(state.selected_location, Some(Coordinate::new(48.85, 2.35)));
        assert!(!state.selected.loading);
    }

    #[tokio::test]
    async fn test_own_and_selected_are_independent() {
        let server = MockServer::start().await;
        mount_location(&server, "51.5,-0.12", "London", Duration::ZERO).await;

        let session = session(&server);
        session.start(&StaticLocation(Some(Coordinate::new(51.5, -0.12)))).await;
        // No mock for this point: the proxy mock answers 404
        session.select_point(Coordinate::new(10.0, 10.0)).await;

        let state = session.state().await;
        assert_eq!(state.own.report.unwrap().current.name, "London");
        assert!(state.own.error.is_none());
        assert!(state.selected.error.is_some());
    }

    #[tokio::test]
    async fn test_toggle_and_tabs() {
        let server = MockServer::start().await;
        let session = session(&server);

        session.toggle_unit().await;
        session.select_tab(Tab::Map).await;
        let state = session.state().await;

        assert_eq!(state.unit, crate::client::units::TemperatureUnit::Fahrenheit);
        assert_eq!(state.active_tab, Tab::Map);
    }
}
