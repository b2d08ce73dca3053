//! Forecast Core
//!
//! Ordinary least squares trend fitting over a position-indexed sequence and
//! one-step-ahead extrapolation.

pub mod linear_trend;

// Re-export SPI traits for implementations
pub use forecast_spi::{ForecastError, Forecaster, Result, TrendLine};

// Re-export main types
pub use linear_trend::{fit, forecast, predict, LinearTrendForecaster};
