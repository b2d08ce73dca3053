//! Forecast Consumer API
//!
//! Consumer configuration and builder APIs for running forecasts.
//!
//! This crate provides:
//! - [`ForecastConfig`] and its builder
//! - [`run_forecast`], which fits once and reports the prediction together
//!   with the fitted line
//! - Re-exports from SPI and core for convenience

mod config;

pub use config::{ForecastConfig, ForecastConfigBuilder};

// Re-export from core
pub use forecast_core::{fit, forecast, linear_trend, predict, LinearTrendForecaster};

// Re-export traits from SPI
pub use forecast_spi::{ForecastError, Forecaster, Result, TrendLine, MAX_HORIZON};

use serde::Serialize;

/// Everything one forecast run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOutcome {
    /// Value at the first index past the observations
    pub prediction: f64,
    /// Values for every step of the configured horizon
    pub forecast: Vec<f64>,
    /// The fitted line
    pub trend: TrendLine,
}

/// Fit `forecaster` to `data` and project it over `config.horizon` steps.
pub fn run_forecast(
    forecaster: &dyn Forecaster,
    data: &[f64],
    config: &ForecastConfig,
) -> Result<ForecastOutcome> {
    config.validate()?;
    let trend = forecaster.fit(data)?;
    let forecast = trend.project(config.horizon);
    if forecast.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::out_of_range("forecast"));
    }
    Ok(ForecastOutcome {
        prediction: trend.next_value(),
        forecast,
        trend,
    })
}
