//! Transform stages of the visualizer pipeline
//!
//! Feature derivation, indicator aggregation and correlation, plus the
//! statistics they share.

pub mod aggregate;
pub mod correlation;
pub mod features;
pub mod statistics;

pub use aggregate::{IndicatorCount, IndicatorObservation, categorical_counts};
pub use correlation::{CorrelationMatrix, correlation_matrix};
pub use features::derive_features;
