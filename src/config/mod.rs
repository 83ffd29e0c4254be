//! Configuration for the visualizer pipeline.

use std::path::PathBuf;

/// Configuration for reading the examination file
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter
    pub delimiter: u8,
    /// Number of records used to infer the type of identifier columns
    pub infer_rows: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_rows: 1000,
        }
    }
}

/// Lower and upper quantiles (in `[0, 1]`) bounding the retained rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBand {
    /// Lower quantile
    pub lower: f64,
    /// Upper quantile
    pub upper: f64,
}

impl Default for PercentileBand {
    fn default() -> Self {
        Self {
            lower: 0.025,
            upper: 0.975,
        }
    }
}

/// Pixel dimensions of a rendered figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl FigureSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Configuration for the visualizer
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    /// Examination data file
    pub input_path: PathBuf,
    /// Output path of the categorical bar chart
    pub cat_plot_path: PathBuf,
    /// Output path of the correlation heat map
    pub heat_map_path: PathBuf,
    /// CSV reading options
    pub loader: LoaderConfig,
    /// BMI above which a record counts as overweight
    pub bmi_threshold: f64,
    /// Height/weight band kept by the outlier filter
    pub percentile_band: PercentileBand,
    /// Size of the bar chart
    pub cat_plot_size: FigureSize,
    /// Size of the heat map
    pub heat_map_size: FigureSize,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("medical_examination.csv"),
            cat_plot_path: PathBuf::from("catplot.svg"),
            heat_map_path: PathBuf::from("heatmap.svg"),
            loader: LoaderConfig::default(),
            bmi_threshold: 25.0,
            percentile_band: PercentileBand::default(),
            cat_plot_size: FigureSize::new(1000, 500),
            heat_map_size: FigureSize::new(1200, 1200),
        }
    }
}

impl VisualizerConfig {
    /// Default configuration reading from `input_path`
    #[must_use]
    pub fn with_input(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Default::default()
        }
    }
}
