//! Contract module containing trait definitions for forecast operations

mod forecaster;

pub use forecaster::{check_horizon, Forecaster, MAX_HORIZON};
