//! Forecaster trait definition

use crate::error::{ForecastError, Result};
use crate::model::TrendLine;

/// Largest number of steps a single forecast may project.
pub const MAX_HORIZON: usize = 10_000;

/// Check that `horizon` lies in `1..=MAX_HORIZON`.
pub fn check_horizon(horizon: usize) -> Result<()> {
    let reason = if horizon == 0 {
        "must be at least 1".to_string()
    } else if horizon > MAX_HORIZON {
        format!("must be at most {}, got {}", MAX_HORIZON, horizon)
    } else {
        return Ok(());
    };
    Err(ForecastError::InvalidParameter {
        name: "horizon".to_string(),
        reason,
    })
}

/// A stateless forecaster over an ordered observation sequence.
///
/// Implementations only need to provide [`Forecaster::fit`]; the prediction
/// helpers evaluate the fitted line past the observed range. Every call is
/// pure, so a single instance can be shared across threads.
pub trait Forecaster: Send + Sync {
    /// Short name used in logs and responses
    fn name(&self) -> &str;

    /// Fit a trend line to `data`, indexed by position.
    fn fit(&self, data: &[f64]) -> Result<TrendLine>;

    /// Predict the value at index `data.len()`.
    fn predict(&self, data: &[f64]) -> Result<f64> {
        Ok(self.fit(data)?.next_value())
    }

    /// Predict `horizon` consecutive values after the observed range.
    fn forecast(&self, data: &[f64], horizon: usize) -> Result<Vec<f64>> {
        check_horizon(horizon)?;
        let values = self.fit(data)?.project(horizon);
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::out_of_range("forecast"));
        }
        Ok(values)
    }
}
