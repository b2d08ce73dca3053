//! Linear trend forecasting for time-indexed sequences
//!
//! Uses ordinary least squares (OLS) to fit `y = intercept + slope * t`, where
//! `t` is the position of each observation, then extrapolates past the last
//! observed index.
//!
//! ## When to Use
//!
//! - Data shows a roughly linear trend (monthly sales, stock levels)
//! - A quick, interpretable next-period estimate is enough
//!
//! A single observation is a degenerate fit: the slope is taken as zero and the
//! forecast is flat at that value.

use forecast_spi::{ForecastError, Forecaster, Result, TrendLine};
use tracing::debug;

/// Least-squares linear trend forecaster.
///
/// # Example
///
/// ```rust
/// use forecast_core::{Forecaster, LinearTrendForecaster};
///
/// let sales = vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0];
/// let next = LinearTrendForecaster::new().predict(&sales).unwrap();
/// assert!((next - 22.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrendForecaster;

impl LinearTrendForecaster {
    /// Create a new linear trend forecaster
    pub fn new() -> Self {
        Self
    }
}

impl Forecaster for LinearTrendForecaster {
    fn name(&self) -> &str {
        "linear_trend"
    }

    fn fit(&self, data: &[f64]) -> Result<TrendLine> {
        fit(data)
    }
}

/// Fit an OLS trend line to `data` using positions `0..n` as the regressor.
///
/// Sums run on values divided by a power of two near the largest magnitude,
/// so finite inputs close to `f64::MAX` do not overflow. A line whose slope,
/// intercept or next value still falls outside `f64` is rejected.
pub fn fit(data: &[f64]) -> Result<TrendLine> {
    validate(data)?;

    if data.len() == 1 {
        return Ok(TrendLine::flat(data[0]));
    }

    let scale = power_of_two_scale(data);
    let n = data.len() as f64;
    let mean_t = (n - 1.0) / 2.0;
    let mean_y = data.iter().map(|&y| y / scale).sum::<f64>() / n;

    let (s_tt, s_ty) = data
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(s_tt, s_ty), (i, &y)| {
            let dt = i as f64 - mean_t;
            (s_tt + dt * dt, s_ty + dt * (y / scale - mean_y))
        });

    // s_tt > 0 whenever n >= 2
    let slope = s_ty / s_tt;
    let intercept = mean_y - slope * mean_t;

    let ss_tot: f64 = data.iter().map(|&y| (y / scale - mean_y).powi(2)).sum();
    let ss_res: f64 = data
        .iter()
        .enumerate()
        .map(|(i, &y)| (y / scale - (intercept + slope * i as f64)).powi(2))
        .sum();
    let r_squared = if ss_tot > 1e-10 {
        1.0 - ss_res / ss_tot
    } else {
        1.0
    };

    let line = TrendLine {
        slope: slope * scale,
        intercept: intercept * scale,
        n_observations: data.len(),
        r_squared,
    };
    if !line.slope.is_finite() || !line.intercept.is_finite() {
        return Err(ForecastError::out_of_range("fitted trend"));
    }
    if !line.next_value().is_finite() {
        return Err(ForecastError::out_of_range("prediction"));
    }

    debug!(
        n_observations = line.n_observations,
        slope = line.slope,
        intercept = line.intercept,
        r_squared,
        "fitted linear trend"
    );

    Ok(line)
}

/// Power of two at or below the largest magnitude in `data`, never below 1.
///
/// Dividing by a power of two is exact, so fits that do not overflow are
/// unchanged by the scaling.
fn power_of_two_scale(data: &[f64]) -> f64 {
    let max_abs = data.iter().fold(0.0_f64, |m, y| m.max(y.abs()));
    if max_abs <= 1.0 {
        return 1.0;
    }
    let exponent = (max_abs.log2().floor() as i32).clamp(0, 1023);
    2.0_f64.powi(exponent)
}

/// Predict the value one step past the last observation.
pub fn predict(data: &[f64]) -> Result<f64> {
    LinearTrendForecaster.predict(data)
}

/// Predict `horizon` values past the last observation.
pub fn forecast(data: &[f64], horizon: usize) -> Result<Vec<f64>> {
    LinearTrendForecaster.forecast(data, horizon)
}

fn validate(data: &[f64]) -> Result<()> {
    if data.is_empty() {
        return Err(ForecastError::empty_sequence());
    }
    if let Some((i, &v)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ForecastError::non_finite(i, v));
    }
    Ok(())
}
