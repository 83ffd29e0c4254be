//! Logging utilities for pipeline progress
//!
//! This module provides utilities for consistent stage logging.

pub mod log;

// Re-export commonly used functions for convenience
pub use log::{log_figure_saved, log_operation_complete, log_operation_start, log_warning};
