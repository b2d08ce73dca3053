//! Cleaning policies applied while assembling a sequence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// How gaps (missing values or empty periods) are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingValuePolicy {
    /// Drop the gap
    #[default]
    Skip,
    /// Replace the gap with zero. Biases the fit toward zero; kept for parity
    /// with historical reports.
    Zero,
    /// Carry the last known value forward; leading gaps are dropped
    Previous,
    /// Linear interpolation between neighbours; edges take the nearest value
    Interpolate,
}

/// Time resolution of the assembled sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One observation per document
    #[default]
    Document,
    /// One observation per calendar day
    Daily,
    /// One observation per calendar month
    Monthly,
}

/// How the values falling in one period are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Total of the period
    #[default]
    Sum,
    /// Arithmetic mean of the period
    Mean,
}

impl MissingValuePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingValuePolicy::Skip => "skip",
            MissingValuePolicy::Zero => "zero",
            MissingValuePolicy::Previous => "previous",
            MissingValuePolicy::Interpolate => "interpolate",
        }
    }
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Document => "document",
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        }
    }
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
        }
    }
}

impl FromStr for MissingValuePolicy {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" | "drop" => Ok(MissingValuePolicy::Skip),
            "zero" => Ok(MissingValuePolicy::Zero),
            "previous" | "ffill" => Ok(MissingValuePolicy::Previous),
            "interpolate" => Ok(MissingValuePolicy::Interpolate),
            other => Err(DataError::Config(format!(
                "unknown missing-value policy '{}'",
                other
            ))),
        }
    }
}

impl FromStr for Granularity {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "document" => Ok(Granularity::Document),
            "daily" | "day" => Ok(Granularity::Daily),
            "monthly" | "month" => Ok(Granularity::Monthly),
            other => Err(DataError::Config(format!("unknown granularity '{}'", other))),
        }
    }
}

impl FromStr for Aggregation {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "mean" | "avg" => Ok(Aggregation::Mean),
            other => Err(DataError::Config(format!("unknown aggregation '{}'", other))),
        }
    }
}

impl fmt::Display for MissingValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
