//! Document model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// One record of a document collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier, unique within its collection
    pub id: String,
    /// Field values as stored
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create a document from an id and a field map.
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a document from a JSON value, which must be an object.
    ///
    /// Returns `None` for any other JSON shape.
    pub fn from_value(id: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(id, fields)),
            _ => None,
        }
    }

    /// Look up a field; a missing field and an explicit `null` both read as `None`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }
}

/// Lazily produced documents of one collection.
pub type DocumentStream<'a> = Box<dyn Iterator<Item = Result<Document>> + 'a>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_object() {
        let doc = Document::from_value("a1", json!({"sales": 10})).unwrap();
        assert_eq!(doc.id, "a1");
        assert_eq!(doc.get("sales"), Some(&json!(10)));
    }

    #[test]
    fn test_from_non_object() {
        assert!(Document::from_value("a1", json!([1, 2])).is_none());
        assert!(Document::from_value("a1", json!(3)).is_none());
    }

    #[test]
    fn test_null_reads_as_missing() {
        let doc = Document::from_value("a1", json!({"sales": null})).unwrap();
        assert_eq!(doc.get("sales"), None);
        assert_eq!(doc.get("other"), None);
    }
}
