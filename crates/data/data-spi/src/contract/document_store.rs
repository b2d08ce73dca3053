//! Document store trait definition.

use crate::error::Result;
use crate::model::DocumentStream;

/// Read access to named collections of documents.
///
/// A store is handed to whoever needs it; nothing holds one globally.
pub trait DocumentStore: Send + Sync {
    /// Store name.
    fn name(&self) -> &str;

    /// Names of every collection, sorted.
    fn collections(&self) -> Result<Vec<String>>;

    /// Stream the documents of `collection` in stored order.
    fn stream(&self, collection: &str) -> Result<DocumentStream<'_>>;
}
