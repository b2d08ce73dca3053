//! Model module containing data structures

mod trend_line;

pub use trend_line::TrendLine;
