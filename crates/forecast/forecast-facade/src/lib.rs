//! Forecast Facade
//!
//! Unified re-exports for the forecast module.
//!
//! This facade provides a single entry point for all forecasting functionality:
//! - `forecast_spi` - The `Forecaster` trait, `TrendLine` and `ForecastError`
//! - `forecast_api` - `ForecastConfig`, builders and `run_forecast`
//! - `forecast_core` - The least-squares `LinearTrendForecaster`
//!
//! # Example
//!
//! ```rust
//! use forecast_facade::predict;
//!
//! let next = predict(&[100.0, 110.0, 120.0]).unwrap();
//! assert!((next - 130.0).abs() < 1e-10);
//! ```

// Re-export everything from API (which includes SPI and core)
pub use forecast_api::*;
