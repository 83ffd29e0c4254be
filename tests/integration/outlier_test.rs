use crate::utils::{Record, fixture, sample_records};
use medical_data_visualizer::algorithm::correlation_matrix;
use medical_data_visualizer::filter::{BatchFilter, OutlierFilter, filter_outliers};
use medical_data_visualizer::render::visible_cells;
use medical_data_visualizer::schema::{AP_HI, AP_LO, HEIGHT, WEIGHT};
use medical_data_visualizer::utils::arrow::{float_column, int_column};
use medical_data_visualizer::{PercentileBand, Stage, prepare_table};

#[test]
fn test_inconsistent_blood_pressure_row_is_excluded() {
    let mut records = sample_records(10);
    records.push(Record {
        ap_hi: 120,
        ap_lo: 140,
        ..Record::baseline(99)
    });
    let (_dir, config) = fixture(&records);
    let table = prepare_table(&config).unwrap();

    let full_band = PercentileBand {
        lower: 0.0,
        upper: 1.0,
    };
    let filtered = filter_outliers(&table, full_band).unwrap();
    assert_eq!(filtered.num_rows(), 10);

    let ap_lo = int_column(&filtered, AP_LO, Stage::Filter).unwrap();
    let ap_hi = int_column(&filtered, AP_HI, Stage::Filter).unwrap();
    assert!(ap_lo.values().iter().zip(ap_hi.values().iter()).all(|(lo, hi)| lo <= hi));
}

#[test]
fn test_filtered_rows_lie_within_unfiltered_band() {
    let (_dir, config) = fixture(&sample_records(80));
    let table = prepare_table(&config).unwrap();

    let filter = OutlierFilter::from_batch(&table, config.percentile_band).unwrap();
    let (h_lo, h_hi) = filter.height_bounds();
    let (w_lo, w_hi) = filter.weight_bounds();

    let filtered = filter.filter(&table).unwrap();
    assert!(filtered.num_rows() < table.num_rows());

    let heights = float_column(&filtered, HEIGHT, Stage::Filter).unwrap();
    let weights = float_column(&filtered, WEIGHT, Stage::Filter).unwrap();
    assert!(heights.values().iter().all(|h| (h_lo..=h_hi).contains(h)));
    assert!(weights.values().iter().all(|w| (w_lo..=w_hi).contains(w)));

    // same result through the convenience function
    assert_eq!(filter_outliers(&table, config.percentile_band).unwrap(), filtered);
}

#[test]
fn test_correlation_of_filtered_table() {
    let (_dir, config) = fixture(&sample_records(80));
    let table = prepare_table(&config).unwrap();
    let filtered = filter_outliers(&table, config.percentile_band).unwrap();
    let matrix = correlation_matrix(&filtered).unwrap();

    assert_eq!(matrix.len(), filtered.num_columns());
    assert_eq!(matrix.columns().last().map(String::as_str), Some("overweight"));
    for i in 0..matrix.len() {
        assert_eq!(matrix.get(i, i), 1.0);
        for j in 0..matrix.len() {
            assert_eq!(matrix.get(i, j).to_bits(), matrix.get(j, i).to_bits());
        }
    }

    let cells = visible_cells(&matrix);
    assert!(cells.iter().all(|c| c.row >= c.col));
    assert_eq!(cells.len(), matrix.len() * (matrix.len() + 1) / 2);
}

#[test]
fn test_nan_weight_in_file_keeps_the_remaining_rows() {
    let mut records = sample_records(20);
    records.push(Record {
        weight: f64::NAN,
        ..Record::baseline(99)
    });
    let (_dir, config) = fixture(&records);
    let table = prepare_table(&config).unwrap();
    assert_eq!(table.num_rows(), 21);

    let filtered = filter_outliers(&table, config.percentile_band).unwrap();
    assert!(filtered.num_rows() >= 15);
    let weights = float_column(&filtered, WEIGHT, Stage::Filter).unwrap();
    assert!(weights.values().iter().all(|w| w.is_finite()));

    let matrix = correlation_matrix(&filtered).unwrap();
    assert_eq!(matrix.between(WEIGHT, WEIGHT), Some(1.0));
}
