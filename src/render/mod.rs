//! Figure rendering
//!
//! Renderers are pure: they turn a count table or a correlation matrix into
//! an SVG document held by a [`Figure`]. Writing the document to disk is a
//! separate step, [`Figure::save`].

pub mod catplot;
pub mod heatmap;

use std::io::Write;
use std::path::Path;

use plotters::drawing::DrawingAreaErrorKind;
use tempfile::NamedTempFile;

use crate::config::FigureSize;
use crate::error::{Result, VisualizerError};
use crate::utils::logging::log_figure_saved;

pub use catplot::{CatPlotLayout, render_cat_plot};
pub use heatmap::{HeatmapCell, render_heat_map, visible_cells};

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for VisualizerError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(err.to_string())
    }
}

/// A rendered figure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    title: String,
    size: FigureSize,
    svg: String,
}

impl Figure {
    pub(crate) fn new(title: impl Into<String>, size: FigureSize, svg: String) -> Self {
        Self {
            title: title.into(),
            size,
            svg,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn size(&self) -> FigureSize {
        self.size
    }

    /// The SVG document
    #[must_use]
    pub fn svg(&self) -> &str {
        &self.svg
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.svg.as_bytes()
    }

    /// Write the figure to `path`, replacing any existing file
    ///
    /// The document is written to a temporary file next to `path` and renamed
    /// into place, so a failed write never leaves a truncated image behind.
    ///
    /// # Errors
    /// Returns a render error if the destination directory is not writable.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let write_error = |e: std::io::Error| {
            VisualizerError::Render(format!("failed to write {}: {e}", path.display()))
        };

        let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(self.as_bytes()).map_err(write_error)?;
        file.flush().map_err(write_error)?;
        file.persist(path).map_err(|e| write_error(e.error))?;

        log_figure_saved(&self.title, path);
        Ok(())
    }
}
