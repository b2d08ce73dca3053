//! Data Source Consumer API
//!
//! Configuration types and builders for sequence sources.

mod config;

pub use config::{InputConfig, SeriesConfig, SeriesConfigBuilder, DEFAULT_VALUE_FIELDS};
