//! Sequence source backed by a document store collection.

use data_api::SeriesConfig;
use data_spi::{DataError, DocumentStore, RawObservation, Result, SequenceSource};
use tracing::info;

use crate::cleaning::{fill_missing, parse_timestamp, parse_value};
use crate::series::assemble;

/// Reads one collection from an injected store and cleans it into a sequence.
///
/// The store is borrowed for the lifetime of the source, which is meant to
/// be a single call or request.
pub struct DocumentStreamSource<'a> {
    store: &'a dyn DocumentStore,
    config: SeriesConfig,
    name: String,
}

impl<'a> DocumentStreamSource<'a> {
    /// Create a source for `config.collection` in `store`.
    pub fn new(store: &'a dyn DocumentStore, config: SeriesConfig) -> Self {
        let name = format!("{}:{}", store.name(), config.collection);
        Self {
            store,
            config,
            name,
        }
    }

    /// The configuration this source reads with.
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// Extract one raw observation per document, before any cleaning.
    pub fn observations(&self) -> Result<Vec<RawObservation>> {
        self.config.validate()?;
        let field = self.config.value_field.as_str();
        let timestamp_field = self.config.timestamp_field.as_deref();

        let mut observations = Vec::new();
        for document in self.store.stream(&self.config.collection)? {
            let document = document?;
            let value = match document.get(field) {
                Some(raw) => {
                    let position = format!("document '{}' field '{}'", document.id, field);
                    parse_value(raw, &position)?
                }
                None => None,
            };
            let timestamp = timestamp_field
                .and_then(|f| document.get(f))
                .and_then(parse_timestamp);
            observations.push(RawObservation::new(timestamp, value));
        }
        Ok(observations)
    }
}

impl SequenceSource for DocumentStreamSource<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_sequence(&mut self) -> Result<Vec<f64>> {
        let observations = self.observations()?;
        let documents = observations.len();

        let slots = assemble(
            observations,
            self.config.granularity,
            self.config.aggregation,
            self.config.timestamp_field.is_some(),
        )?;
        let values = fill_missing(&slots, self.config.missing);

        info!(
            source = %self.name,
            documents,
            observations = values.len(),
            granularity = %self.config.granularity,
            missing = %self.config.missing,
            "loaded sequence from collection"
        );

        if values.is_empty() {
            return Err(DataError::NoData);
        }
        Ok(values)
    }
}
