//! Core filtering functionality for examination data
//!
//! This module defines the filter trait and the boolean-mask primitive that
//! every row filter in the crate is built from.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::BooleanArray;
use arrow::compute::filter_record_batch as arrow_filter_record_batch;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::{Result, Stage, VisualizerError};

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(VisualizerError::internal(
            Stage::Filter,
            format!(
                "mask length ({}) doesn't match batch row count ({})",
                mask.len(),
                batch.num_rows()
            ),
        ));
    }

    arrow_filter_record_batch(batch, mask).map_err(|e| VisualizerError::arrow(Stage::Filter, e))
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Boolean mask of the rows of `batch` this filter keeps
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray>;

    /// Filter a record batch
    ///
    /// Fails with a schema error naming the first missing column (by name)
    /// before any mask is computed.
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        check_required_columns(batch, &self.required_columns())?;
        let mask = self.mask(batch)?;
        filter_record_batch(batch, &mask)
    }

    /// Returns the set of column names required by this filter
    fn required_columns(&self) -> HashSet<String>;
}

/// Ensure every column in `required` is present in `batch`
pub fn check_required_columns(batch: &RecordBatch, required: &HashSet<String>) -> Result<()> {
    let schema = batch.schema();
    match required
        .iter()
        .sorted()
        .find(|column| schema.index_of(column).is_err())
    {
        Some(missing) => Err(VisualizerError::column_not_found(Stage::Filter, missing)),
        None => Ok(()),
    }
}

/// A filter that always includes all rows
#[derive(Debug, Clone, Default)]
pub struct IncludeAllFilter;

impl BatchFilter for IncludeAllFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        Ok(BooleanArray::from(vec![true; batch.num_rows()]))
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::new()
    }
}

/// A filter that combines multiple filters with a logical AND
///
/// Every member sees the same input batch, so a member's own statistics are
/// never affected by rows another member removes.
#[derive(Debug, Clone)]
pub struct AndFilter {
    filters: Vec<Arc<dyn BatchFilter + Send + Sync>>,
}

impl AndFilter {
    /// Create a new AND filter
    #[must_use]
    pub fn new(filters: Vec<Arc<dyn BatchFilter + Send + Sync>>) -> Self {
        Self { filters }
    }

    /// Number of combined filters
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl BatchFilter for AndFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let mut combined = IncludeAllFilter.mask(batch)?;
        for filter in &self.filters {
            let mask = filter.mask(batch)?;
            combined = arrow::compute::and(&combined, &mask)
                .map_err(|e| VisualizerError::arrow(Stage::Filter, e))?;
        }
        Ok(combined)
    }

    fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        for filter in &self.filters {
            columns.extend(filter.required_columns());
        }
        columns
    }
}
