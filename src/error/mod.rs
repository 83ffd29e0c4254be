//! Error handling for the visualizer pipeline.

pub mod util;

use std::fmt;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;

/// Pipeline stage in which an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the examination file
    Load,
    /// Computing `overweight` and normalizing ordinal columns
    Derive,
    /// Unpivoting and counting indicator values
    Aggregate,
    /// Outlier filtering and correlation
    Filter,
    /// Drawing or writing a figure
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "load",
            Self::Derive => "derive",
            Self::Aggregate => "aggregate",
            Self::Filter => "filter",
            Self::Render => "render",
        };
        f.write_str(name)
    }
}

/// Errors raised by the visualizer
#[derive(Debug, thiserror::Error)]
pub enum VisualizerError {
    /// The input file is missing, unreadable or malformed
    #[error("load failed for {}: {message}", path.display())]
    DataLoad {
        /// File being read
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// An expected column is absent or has the wrong type
    #[error("{stage} failed: {message}")]
    Schema {
        /// Stage that needed the column
        stage: Stage,
        /// What went wrong
        message: String,
    },

    /// A figure could not be drawn or written
    #[error("render failed: {0}")]
    Render(String),

    /// A pipeline invariant was violated
    #[error("{stage} failed: {message}")]
    Internal {
        /// Stage that detected the violation
        stage: Stage,
        /// What went wrong
        message: String,
    },

    /// Arrow kernel error
    #[error("{stage} failed: Arrow error: {source}")]
    Arrow {
        /// Stage that ran the kernel
        stage: Stage,
        /// Underlying Arrow error
        #[source]
        source: ArrowError,
    },
}

impl VisualizerError {
    /// Create a load error for `path`
    pub fn data_load(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a schema error raised in `stage`
    pub fn schema(stage: Stage, message: impl Into<String>) -> Self {
        Self::Schema {
            stage,
            message: message.into(),
        }
    }

    /// Create an invariant violation error raised in `stage`
    pub fn internal(stage: Stage, message: impl Into<String>) -> Self {
        Self::Internal {
            stage,
            message: message.into(),
        }
    }

    /// Wrap an Arrow kernel error raised in `stage`
    #[must_use]
    pub fn arrow(stage: Stage, source: ArrowError) -> Self {
        Self::Arrow { stage, source }
    }

    /// Create a column not found error
    #[must_use]
    pub fn column_not_found(stage: Stage, column: &str) -> Self {
        Self::schema(stage, format!("column '{column}' not found"))
    }

    /// Stage the error belongs to
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::DataLoad { .. } => Stage::Load,
            Self::Schema { stage, .. } | Self::Internal { stage, .. } | Self::Arrow { stage, .. } => *stage,
            Self::Render(_) => Stage::Render,
        }
    }
}

/// Result type for visualizer operations
pub type Result<T> = std::result::Result<T, VisualizerError>;
