//! Examination file loading utilities

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::config::LoaderConfig;
use crate::error::util::safe_open_file;
use crate::error::{Result, Stage, VisualizerError};
use crate::schema::{REQUIRED_COLUMNS, required_type};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read the examination file into a single record batch
///
/// Required columns are read with their fixed types; every other header
/// column keeps the type inferred from the first `infer_rows` records.
///
/// # Errors
/// Returns a load error if the file is missing or unreadable, the header lacks
/// a required column, a row has the wrong number of fields, or a required
/// value is empty or does not parse.
pub fn load_examinations(path: &Path, config: &LoaderConfig) -> Result<RecordBatch> {
    let start = Instant::now();
    log_operation_start(Stage::Load, &format!("reading {}", path.display()));

    let mut file = safe_open_file(path, "reading examination records")?;
    let schema = Arc::new(read_schema(path, &mut file, config)?);

    file.rewind()
        .map_err(|e| VisualizerError::data_load(path, format!("failed to rewind file: {e}")))?;

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_delimiter(config.delimiter)
        .build(file)
        .map_err(|e| arrow_load_error(path, &e))?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| arrow_load_error(path, &e))?;

    let batch = concat_batches(&schema, &batches).map_err(|e| arrow_load_error(path, &e))?;

    log_operation_complete(Stage::Load, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}

fn read_schema(path: &Path, file: &mut File, config: &LoaderConfig) -> Result<Schema> {
    let format = Format::default()
        .with_header(true)
        .with_delimiter(config.delimiter);

    let (inferred, _) = format
        .infer_schema(&mut *file, Some(config.infer_rows))
        .map_err(|e| arrow_load_error(path, &e))?;

    examination_schema(path, &inferred)
}

/// Build the read schema from the header (and inferred types) of `path`
///
/// # Errors
/// Returns a load error if the header is empty, repeats a column name or
/// lacks a required column.
pub fn examination_schema(path: &Path, header: &Schema) -> Result<Schema> {
    if header.fields().is_empty() {
        return Err(VisualizerError::data_load(path, "missing header row"));
    }

    let mut seen = FxHashSet::default();
    if let Some(duplicate) = header
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .find(|name| !seen.insert(*name))
    {
        return Err(VisualizerError::data_load(
            path,
            format!("header repeats column '{duplicate}'"),
        ));
    }

    let missing = REQUIRED_COLUMNS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !seen.contains(name))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(VisualizerError::data_load(
            path,
            format!(
                "header is missing required column(s): {}",
                missing.iter().join(", ")
            ),
        ));
    }

    let fields = header
        .fields()
        .iter()
        .map(|field| match required_type(field.name()) {
            Some(data_type) => Field::new(field.name(), data_type.clone(), false),
            None => field.as_ref().clone().with_nullable(true),
        })
        .collect::<Vec<_>>();

    Ok(Schema::new(fields))
}

fn arrow_load_error(path: &Path, err: &ArrowError) -> VisualizerError {
    VisualizerError::data_load(path, err.to_string())
}
