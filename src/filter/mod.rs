//! Row filtering for examination tables
//!
//! [`core`] holds the filter trait and mask helpers, [`outlier`] the filters
//! applied before correlation.

pub mod core;
pub mod outlier;

pub use self::core::{AndFilter, BatchFilter, check_required_columns, filter_record_batch};
pub use outlier::{BloodPressureFilter, OutlierFilter, RangeFilter, filter_outliers};
