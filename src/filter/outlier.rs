//! Removal of inconsistent and outlying examination records
//!
//! A record is kept when its diastolic pressure does not exceed the systolic
//! pressure and both height and weight lie inside a percentile band. The band
//! is computed once on the unfiltered table, independently per column.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::BooleanArray;
use arrow::record_batch::RecordBatch;

use crate::algorithm::statistics::percentile;
use crate::config::PercentileBand;
use crate::error::{Result, Stage, VisualizerError};
use crate::filter::core::{AndFilter, BatchFilter};
use crate::schema::{AP_HI, AP_LO, HEIGHT, WEIGHT};
use crate::utils::arrow::{float_column, int_column};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Keeps rows where `ap_lo <= ap_hi`
#[derive(Debug, Clone, Default)]
pub struct BloodPressureFilter;

impl BatchFilter for BloodPressureFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let ap_lo = int_column(batch, AP_LO, Stage::Filter)?;
        let ap_hi = int_column(batch, AP_HI, Stage::Filter)?;
        Ok(ap_lo
            .values()
            .iter()
            .zip(ap_hi.values().iter())
            .map(|(lo, hi)| Some(lo <= hi))
            .collect())
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([AP_LO.to_string(), AP_HI.to_string()])
    }
}

/// Keeps rows where `column` lies in `[lower, upper]`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    column: String,
    lower: f64,
    upper: f64,
}

impl RangeFilter {
    #[must_use]
    pub fn new(column: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            column: column.into(),
            lower,
            upper,
        }
    }

    /// Bounds taken from the percentile band of `column` in `batch`
    ///
    /// An empty batch yields an unbounded range.
    pub fn from_band(batch: &RecordBatch, column: &str, band: PercentileBand) -> Result<Self> {
        let values = float_column(batch, column, Stage::Filter)?;
        let values = values.values();
        let lower = percentile(values, band.lower).unwrap_or(f64::NEG_INFINITY);
        let upper = percentile(values, band.upper).unwrap_or(f64::INFINITY);
        Ok(Self::new(column, lower, upper))
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}

impl BatchFilter for RangeFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let values = float_column(batch, &self.column, Stage::Filter)?;
        Ok(values
            .values()
            .iter()
            .map(|v| Some(self.lower <= *v && *v <= self.upper))
            .collect())
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([self.column.clone()])
    }
}

/// Conjunction of the blood-pressure check and the height/weight bands
#[derive(Debug, Clone)]
pub struct OutlierFilter {
    height: RangeFilter,
    weight: RangeFilter,
    combined: AndFilter,
}

impl OutlierFilter {
    /// Compute the height and weight bands on `batch`
    ///
    /// # Errors
    /// Returns a schema error if the band is not within `[0, 1]` or a needed
    /// column is missing.
    pub fn from_batch(batch: &RecordBatch, band: PercentileBand) -> Result<Self> {
        if !(0.0..=1.0).contains(&band.lower)
            || !(0.0..=1.0).contains(&band.upper)
            || band.lower > band.upper
        {
            return Err(VisualizerError::schema(
                Stage::Filter,
                format!("invalid percentile band [{}, {}]", band.lower, band.upper),
            ));
        }

        let height = RangeFilter::from_band(batch, HEIGHT, band)?;
        let weight = RangeFilter::from_band(batch, WEIGHT, band)?;
        let combined = AndFilter::new(vec![
            Arc::new(BloodPressureFilter),
            Arc::new(height.clone()),
            Arc::new(weight.clone()),
        ]);

        Ok(Self {
            height,
            weight,
            combined,
        })
    }

    #[must_use]
    pub fn height_bounds(&self) -> (f64, f64) {
        self.height.bounds()
    }

    #[must_use]
    pub fn weight_bounds(&self) -> (f64, f64) {
        self.weight.bounds()
    }
}

impl BatchFilter for OutlierFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        self.combined.mask(batch)
    }

    fn required_columns(&self) -> HashSet<String> {
        self.combined.required_columns()
    }
}

/// Drop inconsistent blood-pressure rows and height/weight outliers
pub fn filter_outliers(batch: &RecordBatch, band: PercentileBand) -> Result<RecordBatch> {
    let start = Instant::now();
    log_operation_start(Stage::Filter, "removing blood pressure inconsistencies and outliers");

    let filter = OutlierFilter::from_batch(batch, band)?;
    let (h_lo, h_hi) = filter.height_bounds();
    let (w_lo, w_hi) = filter.weight_bounds();
    log::debug!("height band [{h_lo}, {h_hi}], weight band [{w_lo}, {w_hi}]");

    let filtered = filter.filter(batch)?;
    log::info!(
        "Kept {} of {} records ({} dropped)",
        filtered.num_rows(),
        batch.num_rows(),
        batch.num_rows() - filtered.num_rows()
    );

    log_operation_complete(Stage::Filter, filtered.num_rows(), Some(start.elapsed()));
    Ok(filtered)
}
