//! Data Source Core
//!
//! Document stores, cleaning and the sequence sources built on them.

pub mod cleaning;
pub mod csv_source;
pub mod json_source;
pub mod jsonl;
pub mod memory;
pub mod series;
pub mod stream_source;

pub use cleaning::{fill_missing, parse_text, parse_timestamp, parse_value};
pub use csv_source::CsvReaderSource;
pub use json_source::{sequence_from_json, JsonReaderSource};
pub use jsonl::JsonLinesStore;
pub use memory::MemoryDocumentStore;
pub use series::{assemble, MAX_PERIODS};
pub use stream_source::DocumentStreamSource;
