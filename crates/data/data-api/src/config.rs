//! Data source configuration types.

use data_spi::{Aggregation, DataError, Granularity, MissingValuePolicy, Result};
use serde::{Deserialize, Serialize};

/// Field names tried, in order, when no value field is configured.
pub const DEFAULT_VALUE_FIELDS: [&str; 3] = ["value", "sales", "y"];

/// Configuration for turning one document collection into a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Collection to read (e.g., "inventory", "userrequests")
    pub collection: String,
    /// Field holding the observed value
    pub value_field: String,
    /// Field holding the observation time; orders the sequence when set
    #[serde(default)]
    pub timestamp_field: Option<String>,
    /// Time resolution of the sequence
    #[serde(default)]
    pub granularity: Granularity,
    /// How values inside one period are combined
    #[serde(default)]
    pub aggregation: Aggregation,
    /// How gaps are filled
    #[serde(default)]
    pub missing: MissingValuePolicy,
}

impl SeriesConfig {
    /// Create a per-document configuration without time ordering.
    pub fn new(collection: &str, value_field: &str) -> Self {
        Self {
            collection: collection.to_string(),
            value_field: value_field.to_string(),
            timestamp_field: None,
            granularity: Granularity::Document,
            aggregation: Aggregation::Sum,
            missing: MissingValuePolicy::Skip,
        }
    }

    /// Create a configuration that sums values per calendar month.
    pub fn monthly(collection: &str, value_field: &str, timestamp_field: &str) -> Self {
        Self {
            timestamp_field: Some(timestamp_field.to_string()),
            granularity: Granularity::Monthly,
            ..Self::new(collection, value_field)
        }
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.collection.trim().is_empty() {
            return Err(DataError::Config("collection is required".to_string()));
        }
        if self.value_field.trim().is_empty() {
            return Err(DataError::Config("value_field is required".to_string()));
        }
        if self.granularity != Granularity::Document && self.timestamp_field.is_none() {
            return Err(DataError::Config(format!(
                "{} granularity needs a timestamp_field",
                self.granularity
            )));
        }
        Ok(())
    }
}

/// Builder for SeriesConfig.
#[derive(Debug, Default)]
pub struct SeriesConfigBuilder {
    collection: Option<String>,
    value_field: Option<String>,
    timestamp_field: Option<String>,
    granularity: Option<Granularity>,
    aggregation: Option<Aggregation>,
    missing: Option<MissingValuePolicy>,
}

impl SeriesConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collection.
    pub fn collection(mut self, collection: &str) -> Self {
        self.collection = Some(collection.to_string());
        self
    }

    /// Set the value field.
    pub fn value_field(mut self, field: &str) -> Self {
        self.value_field = Some(field.to_string());
        self
    }

    /// Set the timestamp field.
    pub fn timestamp_field(mut self, field: &str) -> Self {
        self.timestamp_field = Some(field.to_string());
        self
    }

    /// Set the granularity.
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    /// Set the aggregation.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    /// Set the missing-value policy.
    pub fn missing(mut self, missing: MissingValuePolicy) -> Self {
        self.missing = Some(missing);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<SeriesConfig> {
        let config = SeriesConfig {
            collection: self
                .collection
                .ok_or_else(|| DataError::Config("collection is required".to_string()))?,
            value_field: self
                .value_field
                .ok_or_else(|| DataError::Config("value_field is required".to_string()))?,
            timestamp_field: self.timestamp_field,
            granularity: self.granularity.unwrap_or_default(),
            aggregation: self.aggregation.unwrap_or_default(),
            missing: self.missing.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration for sources that decode a byte stream (JSON, CSV).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Object key or CSV column holding the value; CSV also accepts an index
    #[serde(default)]
    pub value_field: Option<String>,
    /// How missing entries are filled
    #[serde(default)]
    pub missing: MissingValuePolicy,
}

impl InputConfig {
    /// Read values from a named field or column.
    pub fn field(value_field: &str) -> Self {
        Self {
            value_field: Some(value_field.to_string()),
            ..Self::default()
        }
    }

    /// Replace the missing-value policy.
    pub fn with_missing(mut self, missing: MissingValuePolicy) -> Self {
        self.missing = missing;
        self
    }
}
