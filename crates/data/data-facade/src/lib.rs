//! Data Source Facade
//!
//! Unified re-exports for the data module.
//!
//! This facade provides a single entry point for all data source functionality:
//! - `data_spi` - Traits, types, and errors for stores and sequence sources
//! - `data_api` - Configuration types and builders
//! - `data_core` - Implementations (in-memory and JSON-lines stores, stream,
//!   JSON and CSV sources, cleaning)
//!
//! # Example
//!
//! ```rust
//! use data_facade::{DocumentStreamSource, MemoryDocumentStore, SequenceSource, SeriesConfig};
//! use serde_json::json;
//!
//! let store = MemoryDocumentStore::new().with_values(
//!     "inventory",
//!     vec![json!({"sales": 100}), json!({"sales": 120})],
//! );
//! let mut source = DocumentStreamSource::new(&store, SeriesConfig::new("inventory", "sales"));
//! assert_eq!(source.load_sequence().unwrap(), vec![100.0, 120.0]);
//! ```

// Re-export everything from SPI
pub use data_spi::*;

// Re-export everything from API
pub use data_api::*;

// Re-export everything from Core
pub use data_core::*;
