//! Analysis modules.
//!
//! Category aggregation for the summary CSV and frequency statistics for
//! the charts.

pub mod aggregator;
pub mod stats;

pub use aggregator::*;
pub use stats::*;
