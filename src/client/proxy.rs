//! HTTP client for the proxy's `/api` endpoints

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::api::ApiErrorBody;
use crate::models::{Coordinate, CurrentConditions, ForecastResponse, LocationReport};
use crate::{ExplorerError, Result};

#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("weather-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_current(&self, coordinate: Coordinate) -> Result<CurrentConditions> {
        self.get_json("weather", coordinate).await
    }

    pub async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<ForecastResponse> {
        self.get_json("forecast", coordinate).await
    }

    /// Fetch current conditions and forecast concurrently; succeeds only if both do.
    #[instrument(skip(self))]
    pub async fn fetch_report(&self, coordinate: Coordinate) -> Result<LocationReport> {
        let (current, forecast) = tokio::try_join!(
            self.fetch_current(coordinate),
            self.fetch_forecast(coordinate)
        )?;
        Ok(LocationReport { current, forecast })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        coordinate: Coordinate,
    ) -> Result<T> {
        let url = format!(
            "{}/api/{}?city={}",
            self.base_url,
            endpoint,
            urlencoding::encode(&coordinate.to_query())
        );
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(reason) = serde_json::from_str::<ApiErrorBody>(&body) {
                debug!("Proxy reported {:?}: {}", reason.kind, reason.error);
            }
            return Err(ExplorerError::proxy(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ExplorerError::decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::fixtures::forecast_json;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_json() -> serde_json::Value {
        serde_json::json!({
            "name": "Greenwich",
            "weather": [{ "main": "Clear", "description": "clear sky" }],
            "main": { "temp": 18.0, "humidity": 40 },
            "wind": { "speed": 1.5 },
            "sys": { "country": "GB" }
        })
    }

    async fn mount_pair(server: &MockServer, forecast_status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .and(query_param("city", "51.5,-0.12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_json()))
            .mount(server)
            .await;

        let start = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let forecast = if forecast_status == 200 {
            ResponseTemplate::new(200).set_body_json(forecast_json(start, 5))
        } else {
            ResponseTemplate::new(forecast_status).set_body_json(serde_json::json!({
                "error": "Request failed with status code 404",
                "kind": "not_found",
                "detail": "city not found"
            }))
        };
        Mock::given(method("GET"))
            .and(path("/api/forecast"))
            .respond_with(forecast)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_report_joins_both() {
        let server = MockServer::start().await;
        mount_pair(&server, 200).await;

        let client = ProxyClient::new(&server.uri()).unwrap();
        let report = client.fetch_report(Coordinate::new(51.5, -0.12)).await.unwrap();

        assert_eq!(report.current.name, "Greenwich");
        assert_eq!(report.forecast.list.len(), 40);
    }

    #[tokio::test]
    async fn test_fetch_report_fails_with_proxy_status_message() {
        let server = MockServer::start().await;
        mount_pair(&server, 500).await;

        let client = ProxyClient::new(&server.uri()).unwrap();
        let err = client
            .fetch_report(Coordinate::new(51.5, -0.12))
            .await
            .unwrap_err();

        assert!(matches!(err, ExplorerError::Proxy { status: 500, .. }));
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = ProxyClient::new(&server.uri()).unwrap();
        let err = client
            .fetch_current(Coordinate::new(1.0, 2.0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 502");
    }
}
