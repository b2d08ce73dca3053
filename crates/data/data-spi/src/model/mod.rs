//! Data models for document collections and observation series.

mod document;
mod observation;
mod policy;

pub use document::{Document, DocumentStream};
pub use observation::RawObservation;
pub use policy::{Aggregation, Granularity, MissingValuePolicy};
