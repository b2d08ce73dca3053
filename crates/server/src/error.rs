//! Error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use data_facade::DataError;
use forecast_facade::ForecastError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::config::ConfigError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Any failure while serving a request.
///
/// Every variant is reported as `500` with an `error` message body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        warn!(%error, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error }),
        )
            .into_response()
    }
}

/// Failures that stop the server from starting or serving
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
