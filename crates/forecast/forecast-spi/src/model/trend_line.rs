//! Fitted trend line model

use serde::{Deserialize, Serialize};

/// A straight line fitted to an observation sequence indexed `0..n`.
///
/// Lives for a single call; nothing about it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    /// Change per time step
    pub slope: f64,
    /// Value at index 0
    pub intercept: f64,
    /// Number of observations the line was fitted on
    pub n_observations: usize,
    /// Coefficient of determination of the fit
    pub r_squared: f64,
}

impl TrendLine {
    /// Flat line through a single observation.
    pub fn flat(value: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: value,
            n_observations: 1,
            r_squared: 1.0,
        }
    }

    /// Value of the line at time index `t`.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }

    /// Value one step past the last observed index.
    pub fn next_value(&self) -> f64 {
        self.evaluate(self.n_observations as f64)
    }

    /// Values for the `steps` indices following the observed range.
    pub fn project(&self, steps: usize) -> Vec<f64> {
        (0..steps)
            .map(|i| self.evaluate((self.n_observations + i) as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_line() {
        let line = TrendLine::flat(5.0);
        assert_eq!(line.slope, 0.0);
        assert_eq!(line.intercept, 5.0);
        assert_eq!(line.next_value(), 5.0);
    }

    #[test]
    fn test_evaluate() {
        let line = TrendLine {
            slope: 2.0,
            intercept: 10.0,
            n_observations: 4,
            r_squared: 1.0,
        };
        assert_eq!(line.evaluate(0.0), 10.0);
        assert_eq!(line.evaluate(2.5), 15.0);
        assert_eq!(line.next_value(), 18.0);
    }

    #[test]
    fn test_project_continues_after_last_index() {
        let line = TrendLine {
            slope: -1.0,
            intercept: 3.0,
            n_observations: 2,
            r_squared: 1.0,
        };
        assert_eq!(line.project(3), vec![1.0, 0.0, -1.0]);
        assert!(line.project(0).is_empty());
    }

    #[test]
    fn test_serializes_field_names() {
        let json = serde_json::to_value(TrendLine::flat(1.5)).unwrap();
        assert_eq!(json["slope"], 0.0);
        assert_eq!(json["intercept"], 1.5);
        assert_eq!(json["n_observations"], 1);
    }
}
