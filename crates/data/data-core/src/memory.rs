//! In-memory document store.

use std::collections::BTreeMap;

use data_spi::{DataError, Document, DocumentStore, DocumentStream, Result};
use serde_json::Value;

/// Collections held in memory.
///
/// # Example
///
/// ```rust
/// use data_core::MemoryDocumentStore;
/// use data_spi::DocumentStore;
/// use serde_json::json;
///
/// let store = MemoryDocumentStore::new()
///     .with_values("inventory", vec![json!({"sales": 10}), json!({"sales": 12})]);
/// assert_eq!(store.collections().unwrap(), vec!["inventory".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: BTreeMap<String, Vec<Document>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a collection.
    pub fn with_collection(mut self, name: &str, documents: Vec<Document>) -> Self {
        self.insert(name, documents);
        self
    }

    /// Add a collection from JSON objects; ids are `<name>:<position>`.
    ///
    /// Values that are not objects are ignored.
    pub fn with_values(self, name: &str, values: Vec<Value>) -> Self {
        let documents = values
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| Document::from_value(format!("{}:{}", name, i + 1), v))
            .collect();
        self.with_collection(name, documents)
    }

    /// Add (or replace) a collection in place.
    pub fn insert(&mut self, name: &str, documents: Vec<Document>) {
        self.collections.insert(name.to_string(), documents);
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn collections(&self) -> Result<Vec<String>> {
        Ok(self.collections.keys().cloned().collect())
    }

    fn stream(&self, collection: &str) -> Result<DocumentStream<'_>> {
        let documents = self
            .collections
            .get(collection)
            .ok_or_else(|| DataError::UnknownCollection(collection.to_string()))?;
        Ok(Box::new(documents.iter().cloned().map(Ok)))
    }
}
