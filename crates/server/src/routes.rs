//! API route handlers

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use data_facade::{
    sequence_from_json, Aggregation, DocumentStreamSource, Granularity, InputConfig,
    MissingValuePolicy, SequenceSource, SeriesConfig,
};
use forecast_facade::{run_forecast, ForecastConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<f64>>,
}

/// `POST /api/v1/predict`
///
/// Accepts `{"data": [...], "horizon"?: n, "missing"?: policy}` or a bare array.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let request: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let horizon = parse_horizon(request.get("horizon"))?;
    let mut input = InputConfig::default();
    if let Some(missing) = request.get("missing").and_then(Value::as_str) {
        input.missing = missing.parse()?;
    }

    let data = sequence_from_json(&request, &input)?;
    let outcome = run_forecast(
        state.forecaster.as_ref(),
        &data,
        &ForecastConfig::with_horizon(horizon),
    )?;
    info!(
        observations = data.len(),
        prediction = outcome.prediction,
        "served prediction"
    );

    Ok(Json(PredictResponse {
        prediction: outcome.prediction,
        forecast: (horizon > 1).then_some(outcome.forecast),
    }))
}

fn parse_horizon(raw: Option<&Value>) -> Result<usize, ApiError> {
    match raw {
        None | Some(Value::Null) => Ok(1),
        Some(value) => value
            .as_u64()
            .map(|h| h as usize)
            .ok_or_else(|| bad_horizon(value)),
    }
}

fn bad_horizon(raw: impl std::fmt::Display) -> ApiError {
    ApiError::BadRequest(format!("horizon must be a whole number, got {}", raw))
}

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<String>,
}

/// `GET /api/v1/collections`
pub async fn collections(
    State(state): State<AppState>,
) -> Result<Json<CollectionsResponse>, ApiError> {
    let collections = state.store.collections()?;
    Ok(Json(CollectionsResponse { collections }))
}

/// Query parameters of the collection forecast.
///
/// Kept as strings so bad values surface as `{"error"}` bodies.
#[derive(Debug, Default, Deserialize)]
pub struct CollectionQuery {
    pub field: Option<String>,
    pub timestamp: Option<String>,
    pub granularity: Option<String>,
    pub aggregation: Option<String>,
    pub missing: Option<String>,
    pub horizon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CollectionPredictResponse {
    pub prediction: f64,
    pub collection: String,
    pub observations: usize,
    pub slope: f64,
    pub intercept: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<f64>>,
}

/// `GET /api/v1/collections/:collection/predict`
pub async fn predict_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<CollectionPredictResponse>, ApiError> {
    let config = series_config(&state, &collection, &query)?;
    let horizon = match query.horizon.as_deref() {
        None => 1,
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| bad_horizon(raw))?,
    };

    let mut source = DocumentStreamSource::new(state.store.as_ref(), config);
    let data = source.load_sequence()?;
    let outcome = run_forecast(
        state.forecaster.as_ref(),
        &data,
        &ForecastConfig::with_horizon(horizon),
    )?;
    info!(
        %collection,
        observations = data.len(),
        prediction = outcome.prediction,
        "served collection prediction"
    );

    Ok(Json(CollectionPredictResponse {
        prediction: outcome.prediction,
        collection,
        observations: data.len(),
        slope: outcome.trend.slope,
        intercept: outcome.trend.intercept,
        forecast: (horizon > 1).then_some(outcome.forecast),
    }))
}

/// Merge query overrides onto the server's default fields.
fn series_config(
    state: &AppState,
    collection: &str,
    query: &CollectionQuery,
) -> Result<SeriesConfig, ApiError> {
    let mut config = SeriesConfig::new(
        collection,
        query.field.as_deref().unwrap_or(&state.value_field),
    );
    config.timestamp_field = match query.timestamp.as_deref() {
        Some(field) if field.trim().is_empty() => None,
        Some(field) => Some(field.to_string()),
        None => state.timestamp_field.clone(),
    };
    if let Some(raw) = query.granularity.as_deref() {
        config.granularity = raw.parse::<Granularity>()?;
    }
    if let Some(raw) = query.aggregation.as_deref() {
        config.aggregation = raw.parse::<Aggregation>()?;
    }
    if let Some(raw) = query.missing.as_deref() {
        config.missing = raw.parse::<MissingValuePolicy>()?;
    }
    config.validate()?;
    Ok(config)
}
