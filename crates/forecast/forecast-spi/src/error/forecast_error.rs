//! Forecast error types

use thiserror::Error;

/// Errors that can occur during forecasting operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// The observation sequence is empty or holds a non-finite value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl ForecastError {
    /// Shorthand for the empty-sequence failure.
    pub fn empty_sequence() -> Self {
        ForecastError::InvalidInput("observation sequence is empty".to_string())
    }

    /// Shorthand for a value that is not a finite number.
    pub fn non_finite(position: usize, value: f64) -> Self {
        ForecastError::InvalidInput(format!(
            "observation at position {} is not a finite number ({})",
            position, value
        ))
    }

    /// Shorthand for a fitted or projected value that overflows `f64`.
    pub fn out_of_range(what: &str) -> Self {
        ForecastError::InvalidInput(format!("{} is outside the range of f64", what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_input_error_message() {
        let error = ForecastError::InvalidInput("observation sequence is empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid input: observation sequence is empty"
        );
    }

    #[test]
    fn test_empty_sequence_shorthand() {
        assert_eq!(
            ForecastError::empty_sequence().to_string(),
            "Invalid input: observation sequence is empty"
        );
    }

    #[test]
    fn test_out_of_range_shorthand() {
        assert_eq!(
            ForecastError::out_of_range("prediction").to_string(),
            "Invalid input: prediction is outside the range of f64"
        );
    }

    #[test]
    fn test_non_finite_names_position() {
        let msg = ForecastError::non_finite(3, f64::NAN).to_string();
        assert!(msg.contains("position 3"));
        assert!(msg.contains("NaN"));
    }

    #[test]
    fn test_invalid_parameter_error_message() {
        let error = ForecastError::InvalidParameter {
            name: "horizon".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'horizon': must be at least 1"
        );
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn Error> = Box::new(ForecastError::empty_sequence());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForecastError>();
    }

    #[test]
    fn test_error_downcast() {
        let error: Box<dyn Error + Send + Sync> = Box::new(ForecastError::empty_sequence());
        let downcasted = error.downcast_ref::<ForecastError>();
        assert!(matches!(downcasted, Some(ForecastError::InvalidInput(_))));
    }
}
