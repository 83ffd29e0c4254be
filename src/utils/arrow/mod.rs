//! Arrow data handling utilities
//!
//! This module contains utilities for typed access to Arrow record batches.

pub mod array_utils;

// Re-export commonly used functions for convenience
pub use array_utils::{float_column, get_column_by_name, get_column_index, int_column};
