//! End-to-end pipeline: load, derive, then draw each figure
//!
//! The prepared table is passed explicitly to each drawing step. The two
//! drawing steps only read it and can run in either order.

use arrow::record_batch::RecordBatch;

use crate::algorithm::{categorical_counts, correlation_matrix, derive_features};
use crate::config::VisualizerConfig;
use crate::error::Result;
use crate::filter::filter_outliers;
use crate::loader::load_examinations;
use crate::render::{Figure, render_cat_plot, render_heat_map};

/// Load the examination file and derive `overweight` and the normalized
/// ordinal columns
pub fn prepare_table(config: &VisualizerConfig) -> Result<RecordBatch> {
    let loaded = load_examinations(&config.input_path, &config.loader)?;
    derive_features(&loaded, config.bmi_threshold)
}

/// Count indicator values per `cardio` group, draw the bar chart and save it
/// to `config.cat_plot_path`
pub fn draw_cat_plot(table: &RecordBatch, config: &VisualizerConfig) -> Result<Figure> {
    let counts = categorical_counts(table)?;
    let figure = render_cat_plot(&counts, config.cat_plot_size)?;
    figure.save(&config.cat_plot_path)?;
    Ok(figure)
}

/// Drop outliers, correlate every numeric column, draw the heat map and save
/// it to `config.heat_map_path`
pub fn draw_heat_map(table: &RecordBatch, config: &VisualizerConfig) -> Result<Figure> {
    let filtered = filter_outliers(table, config.percentile_band)?;
    let matrix = correlation_matrix(&filtered)?;
    let figure = render_heat_map(&matrix, config.heat_map_size)?;
    figure.save(&config.heat_map_path)?;
    Ok(figure)
}
