//! Forecast Service Provider Interface
//!
//! Defines the forecaster contract, the fitted trend model and the error type
//! shared by every forecasting implementation.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{check_horizon, Forecaster, MAX_HORIZON};
pub use error::{ForecastError, Result};
pub use model::TrendLine;
