//! Sequence source that decodes JSON from a reader (stdin, a file, a body).

use std::io::{self, Read};

use data_api::{InputConfig, DEFAULT_VALUE_FIELDS};
use data_spi::{DataError, Result, SequenceSource};
use serde_json::Value;
use tracing::debug;

use crate::cleaning::{fill_missing, parse_value};

/// Keys searched, in order, when the top-level JSON value is an object.
pub const CONTAINER_KEYS: [&str; 4] = ["data", "values", "series", "sales"];

/// One-shot JSON source; the reader is consumed by the first load.
///
/// Accepted shapes:
/// - `[1, 2, null, "4"]`
/// - `[{"sales": 1}, {"sales": 2}]`
/// - `{"data": [...]}` (also `values`, `series`, `sales`)
pub struct JsonReaderSource<R> {
    reader: Option<R>,
    config: InputConfig,
    name: String,
}

impl<R: Read> JsonReaderSource<R> {
    /// Create a source over `reader`.
    pub fn new(reader: R, config: InputConfig) -> Self {
        Self {
            reader: Some(reader),
            config,
            name: "json".to_string(),
        }
    }

    /// Rename the source, e.g. after the file it reads.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl JsonReaderSource<io::Stdin> {
    /// Source reading the process's standard input.
    pub fn stdin(config: InputConfig) -> Self {
        Self::new(io::stdin(), config).with_name("stdin")
    }
}

impl<R: Read> SequenceSource for JsonReaderSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_sequence(&mut self) -> Result<Vec<f64>> {
        let reader = self
            .reader
            .take()
            .ok_or_else(|| DataError::Exhausted(self.name.clone()))?;
        let json: Value = serde_json::from_reader(reader)?;
        let values = sequence_from_json(&json, &self.config)?;
        debug!(source = %self.name, observations = values.len(), "decoded JSON sequence");
        if values.is_empty() {
            return Err(DataError::NoData);
        }
        Ok(values)
    }
}

/// Clean an already-decoded JSON value into a sequence.
///
/// An empty array yields an empty sequence; deciding whether that is an error
/// is left to the caller.
pub fn sequence_from_json(json: &Value, config: &InputConfig) -> Result<Vec<f64>> {
    let slots = slots_from_json(json, config)?;
    Ok(fill_missing(&slots, config.missing))
}

fn slots_from_json(json: &Value, config: &InputConfig) -> Result<Vec<Option<f64>>> {
    match json {
        Value::Array(items) => array_slots(items, config),
        Value::Object(map) => CONTAINER_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(|items| array_slots(items, config))
            .unwrap_or_else(|| {
                Err(DataError::Parse(format!(
                    "expected an object with one of {:?} holding an array",
                    CONTAINER_KEYS
                )))
            }),
        _ => Err(DataError::Parse(
            "expected a JSON array of observations".to_string(),
        )),
    }
}

fn array_slots(items: &[Value], config: &InputConfig) -> Result<Vec<Option<f64>>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => {
                let field = config.value_field.as_deref().or_else(|| {
                    DEFAULT_VALUE_FIELDS
                        .iter()
                        .copied()
                        .find(|key| map.contains_key(*key))
                });
                match field.and_then(|f| map.get(f).map(|raw| (f, raw))) {
                    Some((f, raw)) => parse_value(raw, &format!("index {} field '{}'", i, f)),
                    None => Ok(None),
                }
            }
            other => parse_value(other, &format!("index {}", i)),
        })
        .collect()
}
