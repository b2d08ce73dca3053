//! Data Source Service Provider Interface
//!
//! Defines traits and types for reading document collections and turning them
//! into observation sequences.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{DocumentStore, SequenceSource};
pub use error::{DataError, Result};
pub use model::{
    Aggregation, Document, DocumentStream, Granularity, MissingValuePolicy, RawObservation,
};

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct OneCollection(Vec<Document>);

    impl DocumentStore for OneCollection {
        fn name(&self) -> &str {
            "one"
        }

        fn collections(&self) -> Result<Vec<String>> {
            Ok(vec!["only".to_string()])
        }

        fn stream(&self, collection: &str) -> Result<DocumentStream<'_>> {
            if collection != "only" {
                return Err(DataError::UnknownCollection(collection.to_string()));
            }
            Ok(Box::new(self.0.iter().cloned().map(Ok)))
        }
    }

    #[test]
    fn test_store_as_trait_object() {
        let doc = Document::from_value("d1", json!({"sales": 1})).unwrap();
        let store: Box<dyn DocumentStore> = Box::new(OneCollection(vec![doc.clone()]));

        let docs: Vec<Document> = store.stream("only").unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(docs, vec![doc]);
        assert!(matches!(
            store.stream("other"),
            Err(DataError::UnknownCollection(_))
        ));
    }

    struct Fixed(Vec<f64>);

    impl SequenceSource for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn load_sequence(&mut self) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_sequence_source_as_trait_object() {
        let mut source: Box<dyn SequenceSource> = Box::new(Fixed(vec![1.0, 2.0]));
        assert_eq!(source.name(), "fixed");
        assert_eq!(source.load_sequence().unwrap(), vec![1.0, 2.0]);
    }
}
