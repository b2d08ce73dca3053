//! Raw observation extracted from a single document.

use chrono::{DateTime, Utc};

/// A possibly-incomplete observation before cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawObservation {
    /// Parsed timestamp, `None` when absent or unparseable
    pub timestamp: Option<DateTime<Utc>>,
    /// Parsed value, `None` when missing
    pub value: Option<f64>,
}

impl RawObservation {
    /// Create an observation.
    pub fn new(timestamp: Option<DateTime<Utc>>, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    /// Observation without a timestamp.
    pub fn untimed(value: Option<f64>) -> Self {
        Self::new(None, value)
    }
}
