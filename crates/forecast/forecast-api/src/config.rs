//! Forecast configuration types.

use forecast_spi::{check_horizon, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a forecast run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of steps to project past the last observation
    pub horizon: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self { horizon: 1 }
    }
}

impl ForecastConfig {
    /// Create a configuration projecting `horizon` steps.
    pub fn with_horizon(horizon: usize) -> Self {
        Self { horizon }
    }

    /// Check the configuration is usable: `1 <= horizon <= MAX_HORIZON`.
    pub fn validate(&self) -> Result<()> {
        check_horizon(self.horizon)
    }
}

/// Builder for ForecastConfig.
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    horizon: Option<usize>,
}

impl ForecastConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizon.
    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<ForecastConfig> {
        let config = ForecastConfig {
            horizon: self.horizon.unwrap_or(1),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_horizon_is_one() {
        assert_eq!(ForecastConfig::default().horizon, 1);
    }

    #[test]
    fn test_builder_success() {
        let config = ForecastConfigBuilder::new().horizon(6).build().unwrap();
        assert_eq!(config.horizon, 6);
    }

    #[test]
    fn test_builder_default() {
        let config = ForecastConfigBuilder::new().build().unwrap();
        assert_eq!(config, ForecastConfig::default());
    }

    #[test]
    fn test_builder_zero_horizon() {
        assert!(ForecastConfigBuilder::new().horizon(0).build().is_err());
    }

    #[test]
    fn test_builder_horizon_upper_bound() {
        use forecast_spi::{ForecastError, MAX_HORIZON};

        assert!(ForecastConfigBuilder::new().horizon(MAX_HORIZON).build().is_ok());
        let err = ForecastConfigBuilder::new()
            .horizon(100_000_000_000)
            .build()
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }

    #[test]
    fn test_deserialize() {
        let config: ForecastConfig = serde_json::from_str(r#"{"horizon": 3}"#).unwrap();
        assert_eq!(config.horizon, 3);
    }
}
