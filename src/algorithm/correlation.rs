//! Pairwise Pearson correlation of the numeric columns of a table

use std::time::Instant;

use arrow::array::Float64Array;
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::algorithm::statistics::pearson;
use crate::error::{Result, Stage, VisualizerError};
use crate::utils::arrow::array_utils::downcast_array;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Square correlation matrix labelled by column name
///
/// Entries are stored row-major. Undefined coefficients (a constant column,
/// fewer than two paired observations) are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Build a matrix from row-major `values`
    ///
    /// # Panics
    /// Panics if `values` does not hold `columns.len()^2` entries.
    #[must_use]
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            columns.len() * columns.len(),
            "correlation matrix must be square"
        );
        Self { columns, values }
    }

    /// Column labels, in table order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows (and columns)
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient at (`row`, `col`)
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.len() + col]
    }

    /// Coefficient between two named columns
    #[must_use]
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let row = self.columns.iter().position(|c| c == a)?;
        let col = self.columns.iter().position(|c| c == b)?;
        Some(self.get(row, col))
    }
}

/// Correlation matrix over every numeric column of `batch`
///
/// Each pair uses the rows where both values are present. Non-numeric
/// columns are skipped.
pub fn correlation_matrix(batch: &RecordBatch) -> Result<CorrelationMatrix> {
    let start = Instant::now();
    log_operation_start(Stage::Filter, "computing pairwise correlations");

    let schema = batch.schema();
    let mut columns = Vec::new();
    let mut samples = Vec::new();
    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        if !field.data_type().is_numeric() {
            log::debug!("Skipping non-numeric column '{}'", field.name());
            continue;
        }
        let converted =
            cast(array, &DataType::Float64).map_err(|e| VisualizerError::arrow(Stage::Filter, e))?;
        let floats = downcast_array::<Float64Array>(&converted, field.name(), Stage::Filter)?;
        columns.push(field.name().clone());
        samples.push(floats.iter().collect::<Vec<Option<f64>>>());
    }

    let n = columns.len();
    let mut values = vec![f64::NAN; n * n];
    for i in 0..n {
        for j in i..n {
            let r = pairwise_pearson(&samples[i], &samples[j]);
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    log_operation_complete(Stage::Filter, n * n, Some(start.elapsed()));
    Ok(CorrelationMatrix::new(columns, values))
}

fn pairwise_pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();
    pearson(&xs, &ys)
}
