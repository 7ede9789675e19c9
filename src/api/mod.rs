use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ExplorerError;
use crate::error::ErrorKind;
use crate::query::LocationQuery;
use crate::upstream::{UpstreamEndpoint, WeatherSource};

pub type SharedSource = Arc<dyn WeatherSource>;

#[derive(Debug, Deserialize)]
pub struct CityParams {
    pub city: Option<String>,
}

/// Body sent with every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub kind: ErrorKind,
    /// Provider explanation, when the provider gave one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Handler error: always answered with 500 and an [`ApiErrorBody`]
#[derive(Debug)]
pub struct ApiError(ExplorerError);

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.0.to_string(),
            kind: self.0.kind(),
            detail: self.0.detail().map(str::to_string),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub fn router(source: SharedSource) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/forecast", get(get_forecast))
        .route("/health", get(health))
        .with_state(source)
}

async fn get_weather(
    State(source): State<SharedSource>,
    params: Result<Query<CityParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    relay(source.as_ref(), UpstreamEndpoint::Current, params).await
}

async fn get_forecast(
    State(source): State<SharedSource>,
    params: Result<Query<CityParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    relay(source.as_ref(), UpstreamEndpoint::Forecast, params).await
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok", "version": crate::VERSION }))
}

async fn relay(
    source: &dyn WeatherSource,
    endpoint: UpstreamEndpoint,
    params: Result<Query<CityParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params.map_err(|e| ExplorerError::invalid_query(e.body_text()))?;
    let query = LocationQuery::from_param(params.city.as_deref())?;

    match source.fetch(endpoint, &query).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::error!("{} lookup for '{}' failed: {}", endpoint.path(), query, e);
            Err(e.into())
        }
    }
}
