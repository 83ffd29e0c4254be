//! Derived risk indicators
//!
//! Appends the `overweight` flag and collapses the ordinal `cholesterol` and
//! `gluc` levels to `0` (normal) / `1` (above normal).

use std::sync::Arc;
use std::time::Instant;

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::{Result, Stage, VisualizerError};
use crate::schema::{CHOLESTEROL, GLUC, HEIGHT, OVERWEIGHT, WEIGHT};
use crate::utils::arrow::{float_column, int_column};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Body-mass index from height in centimetres and weight in kilograms
#[must_use]
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    weight_kg / (height_cm / 100.0).powi(2)
}

/// `1` where the BMI is strictly above `threshold`, else `0`
#[must_use]
pub fn overweight_flags(height: &Int64Array, weight: &Float64Array, threshold: f64) -> Int64Array {
    Int64Array::from_iter_values(
        height
            .values()
            .iter()
            .zip(weight.values().iter())
            .map(|(&h, &w)| i64::from(bmi(h as f64, w) > threshold)),
    )
}

/// Map ordinal level `1` to `0` and any level above it to `1`
///
/// Levels outside `{1, 2, 3}` are not meaningful input; they still follow the
/// `> 1` rule, see [`count_out_of_range`].
#[must_use]
pub fn binarize_ordinal(values: &Int64Array) -> Int64Array {
    Int64Array::from_iter_values(values.values().iter().map(|&v| i64::from(v > 1)))
}

/// Number of values outside the ordinal levels `{1, 2, 3}`
#[must_use]
pub fn count_out_of_range(values: &Int64Array) -> usize {
    values
        .values()
        .iter()
        .filter(|v| !(1..=3).contains(*v))
        .count()
}

/// Derive `overweight` and normalize `cholesterol` / `gluc`
///
/// The returned batch has the same columns in the same order, with the two
/// ordinal columns overwritten and `overweight` appended (or replaced if the
/// input already carries one).
///
/// # Errors
/// Returns a schema error if an input column is missing, mistyped or
/// contains nulls.
pub fn derive_features(batch: &RecordBatch, bmi_threshold: f64) -> Result<RecordBatch> {
    let start = Instant::now();
    log_operation_start(Stage::Derive, "computing overweight and normalizing ordinal columns");

    let height = int_column(batch, HEIGHT, Stage::Derive)?;
    let weight = float_column(batch, WEIGHT, Stage::Derive)?;
    let overweight = overweight_flags(&height, &weight, bmi_threshold);

    let mut derived = batch.clone();
    for column in [CHOLESTEROL, GLUC] {
        let levels = int_column(batch, column, Stage::Derive)?;
        let unexpected = count_out_of_range(&levels);
        if unexpected > 0 {
            log_warning(
                &format!("{unexpected} '{column}' values outside levels 1-3 were binarized with the > 1 rule"),
                None,
            );
        }
        derived = set_column(&derived, column, Arc::new(binarize_ordinal(&levels)))?;
    }
    let derived = set_column(&derived, OVERWEIGHT, Arc::new(overweight))?;

    log_operation_complete(Stage::Derive, derived.num_rows(), Some(start.elapsed()));
    Ok(derived)
}

/// Replace column `name` with a non-nullable `Int64` array, appending it if absent
fn set_column(batch: &RecordBatch, name: &str, values: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields = schema.fields().iter().cloned().collect::<Vec<_>>();
    let mut columns = batch.columns().to_vec();
    let field = Arc::new(Field::new(name, DataType::Int64, false));

    match schema.index_of(name) {
        Ok(idx) => {
            fields[idx] = field;
            columns[idx] = values;
        }
        Err(_) => {
            fields.push(field);
            columns.push(values);
        }
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .map_err(|e| VisualizerError::arrow(Stage::Derive, e))
}
