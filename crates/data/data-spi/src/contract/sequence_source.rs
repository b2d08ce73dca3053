//! Sequence source trait definition.

use crate::error::Result;

/// Anything that can supply an ordered numeric sequence for forecasting.
///
/// Implementations clean their input before handing it over: the returned
/// values are finite and in time order, index 0 first.
pub trait SequenceSource {
    /// Source name.
    fn name(&self) -> &str;

    /// Load the cleaned sequence.
    fn load_sequence(&mut self) -> Result<Vec<f64>>;
}
