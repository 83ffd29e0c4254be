//! Utilities for working with Arrow arrays.
//!
//! Typed column access for record batches. Every lookup carries the pipeline
//! stage so a missing or mistyped column is reported where it was needed.

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{Result, Stage, VisualizerError};

/// Get the column index by name from a record batch
///
/// # Errors
/// Returns a schema error if the column does not exist
pub fn get_column_index(batch: &RecordBatch, column_name: &str, stage: Stage) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| VisualizerError::column_not_found(stage, column_name))
}

/// Get a column from a record batch by name
pub fn get_column_by_name(batch: &RecordBatch, column_name: &str, stage: Stage) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name, stage)?;
    Ok(batch.column(idx).clone())
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `stage` - The stage requesting the column
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    stage: Stage,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        VisualizerError::schema(
            stage,
            format!(
                "column '{column_name}' has unexpected type {:?}",
                array.data_type()
            ),
        )
    })
}

fn reject_nulls(array: &ArrayRef, column_name: &str, stage: Stage) -> Result<()> {
    if array.null_count() > 0 {
        return Err(VisualizerError::schema(
            stage,
            format!(
                "column '{column_name}' contains {} missing values",
                array.null_count()
            ),
        ));
    }
    Ok(())
}

/// Read an integer column as `Int64`
///
/// Any integer width is accepted; floating point and text columns are a
/// schema error, as are null entries.
pub fn int_column(batch: &RecordBatch, column_name: &str, stage: Stage) -> Result<Int64Array> {
    let array = get_column_by_name(batch, column_name, stage)?;
    if !array.data_type().is_integer() {
        return Err(VisualizerError::schema(
            stage,
            format!(
                "column '{column_name}' must be an integer column, found {:?}",
                array.data_type()
            ),
        ));
    }
    reject_nulls(&array, column_name, stage)?;

    let converted = cast(&array, &DataType::Int64).map_err(|e| VisualizerError::arrow(stage, e))?;
    Ok(downcast_array::<Int64Array>(&converted, column_name, stage)?.clone())
}

/// Read a numeric column as `Float64`
pub fn float_column(batch: &RecordBatch, column_name: &str, stage: Stage) -> Result<Float64Array> {
    let array = get_column_by_name(batch, column_name, stage)?;
    if !array.data_type().is_numeric() {
        return Err(VisualizerError::schema(
            stage,
            format!(
                "column '{column_name}' must be numeric, found {:?}",
                array.data_type()
            ),
        ));
    }
    reject_nulls(&array, column_name, stage)?;

    let converted = cast(&array, &DataType::Float64).map_err(|e| VisualizerError::arrow(stage, e))?;
    Ok(downcast_array::<Float64Array>(&converted, column_name, stage)?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("height", DataType::Int32, false),
            Field::new("weight", DataType::Float64, false),
            Field::new("name", DataType::Utf8, false),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(arrow::array::Int32Array::from(vec![170, 180])),
                Arc::new(Float64Array::from(vec![70.5, 80.0])),
                Arc::new(StringArray::from(vec!["a", "b"])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_int_column_widens() {
        let heights = int_column(&batch(), "height", Stage::Derive).unwrap();
        assert_eq!(heights.values().to_vec(), vec![170, 180]);
    }

    #[test]
    fn test_int_column_rejects_float() {
        let err = int_column(&batch(), "weight", Stage::Derive).unwrap_err();
        assert!(err.to_string().contains("must be an integer column"));
    }

    #[test]
    fn test_float_column_accepts_integers() {
        let heights = float_column(&batch(), "height", Stage::Filter).unwrap();
        assert_eq!(heights.values().to_vec(), vec![170.0, 180.0]);
    }

    #[test]
    fn test_missing_column_reports_stage() {
        let err = float_column(&batch(), "ap_hi", Stage::Filter).unwrap_err();
        assert_eq!(err.to_string(), "filter failed: column 'ap_hi' not found");
    }

    #[test]
    fn test_text_column_is_not_numeric() {
        assert!(float_column(&batch(), "name", Stage::Filter).is_err());
    }
}
