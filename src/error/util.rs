//! Utility functions for error handling
//!
//! This module provides utility functions to make error handling more convenient.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, VisualizerError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a load error naming the path
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(VisualizerError::data_load(
            path,
            format!("file not found (needed for {purpose})"),
        ));
    }

    if !path.is_file() {
        return Err(VisualizerError::data_load(
            path,
            format!("path is not a file (expected a file for {purpose})"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied - check file permissions".to_string(),
            _ => format!("failed to open file for {purpose}"),
        };
        VisualizerError::data_load(path, format!("{context}: {e}"))
    })
}
