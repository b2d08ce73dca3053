//! Contract module containing trait definitions for data access

mod document_store;
mod sequence_source;

pub use document_store::DocumentStore;
pub use sequence_source::SequenceSource;
