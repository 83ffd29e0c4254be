//! Logging utilities
//!
//! This module provides standardized logging functions for pipeline stages.

use std::path::Path;
use std::time::Duration;

use crate::error::Stage;

/// Log a stage start with consistent format
///
/// # Arguments
/// * `stage` - The pipeline stage
/// * `detail` - What the stage is working on
pub fn log_operation_start(stage: Stage, detail: &str) {
    log::info!("[{stage}] {detail}");
}

/// Log a stage completion with consistent format
///
/// # Arguments
/// * `stage` - The pipeline stage
/// * `items` - Number of rows (or cells) produced
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(stage: Stage, items: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::info!("[{stage}] produced {items} items in {duration:?}");
    } else {
        log::info!("[{stage}] produced {items} items");
    }
}

/// Log a figure written to disk
pub fn log_figure_saved(title: &str, path: &Path) {
    log::info!("Saved '{}' to {}", title, path.display());
}

/// Log a warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
