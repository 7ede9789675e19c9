//! OpenWeatherMap client used by the proxy
//!
//! Builds provider URLs from a [`LocationQuery`], injects the server-held
//! credential and returns the provider's JSON body untouched. Every call is a
//! single attempt; failures are reported to the caller as-is.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::ExplorerConfig;
use crate::query::LocationQuery;
use crate::{ExplorerError, Result};

/// Provider read endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamEndpoint {
    /// Current conditions
    Current,
    /// 5-day / 3-hour forecast
    Forecast,
}

impl UpstreamEndpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Current => "weather",
            Self::Forecast => "forecast",
        }
    }
}

/// Source of raw weather JSON for a location query
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, endpoint: UpstreamEndpoint, query: &LocationQuery) -> Result<Value>;
}

/// Build the provider URL for `endpoint` and `query`, always in metric units
#[must_use]
pub fn upstream_url(
    base_url: &str,
    endpoint: UpstreamEndpoint,
    query: &LocationQuery,
    api_key: &str,
) -> String {
    let location = match query {
        LocationQuery::Coordinates { lat, lon } => format!(
            "lat={}&lon={}",
            urlencoding::encode(lat),
            urlencoding::encode(lon)
        ),
        LocationQuery::Name(name) => format!("q={}", urlencoding::encode(name)),
    };

    format!(
        "{}/{}?{}&appid={}&units=metric",
        base_url.trim_end_matches('/'),
        endpoint.path(),
        location,
        urlencoding::encode(api_key)
    )
}

/// Replace the value of the `appid` query parameter with `***`
fn redact_api_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let pairs: Vec<&str> = query
        .split('&')
        .map(|pair| if pair.starts_with("appid=") { "appid=***" } else { pair })
        .collect();
    format!("{}?{}", base, pairs.join("&"))
}

/// Error body the provider sends with non-success statuses
#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

/// HTTP client for the OpenWeatherMap 2.5 API
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client from configuration; fails without an API key
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let api_key = config
            .validate_api_key()
            .map_err(|e| ExplorerError::config(e.to_string()))?;
        let timeout = Duration::from_secs(config.upstream_timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weather-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.openweather_base_url.clone(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(name = "upstream_fetch", skip(self, query), fields(query = %query))]
    async fn fetch(&self, endpoint: UpstreamEndpoint, query: &LocationQuery) -> Result<Value> {
        let url = upstream_url(&self.base_url, endpoint, query, &self.api_key);
        debug!("Provider request URL: {}", redact_api_key(&url));

        let start_time = Instant::now();
        let response = self.client.get(&url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!("Network error calling provider: {}", e);
            ExplorerError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty());
            warn!(
                "Provider returned {}: {}",
                status,
                detail.as_deref().unwrap_or("no message")
            );
            return Err(ExplorerError::upstream(status.as_u16(), detail));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ExplorerError::decode(e.without_url().to_string()))?;

        let total_duration = start_time.elapsed();
        info!(
            "Provider {} answered in {:.3}s",
            endpoint.path(),
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow provider response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(body)
    }
}
