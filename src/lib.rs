//! Exploratory visualisation of medical examination records.
//!
//! Reads a CSV of examination records into an Arrow [`RecordBatch`], derives
//! an `overweight` flag and normalized ordinal columns, and draws two figures:
//! a faceted bar chart of risk-factor counts split by cardiovascular disease
//! status, and a lower-triangular correlation heat map of the outlier-filtered
//! records.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod utils;

// Core types
pub use config::{FigureSize, LoaderConfig, PercentileBand, VisualizerConfig};
pub use error::{Result, Stage, VisualizerError};
pub use render::Figure;

// Pipeline entry points
pub use pipeline::{draw_cat_plot, draw_heat_map, prepare_table};

// Arrow types
pub use arrow::record_batch::RecordBatch;
