use std::collections::HashMap;

use crate::utils::{Record, fixture, sample_records};
use medical_data_visualizer::algorithm::aggregate::{count_indicators, melt_indicators};
use medical_data_visualizer::algorithm::categorical_counts;
use medical_data_visualizer::prepare_table;
use medical_data_visualizer::schema::Indicator;

#[test]
fn test_two_row_table_unpivots_to_twelve_observations() {
    let records = vec![
        Record {
            cardio: 1,
            smoke: 1,
            ..Record::baseline(0)
        },
        Record {
            cholesterol: 3,
            weight: 110.0,
            ..Record::baseline(1)
        },
    ];
    let (_dir, config) = fixture(&records);
    let table = prepare_table(&config).unwrap();

    let observations = melt_indicators(&table).unwrap();
    assert_eq!(observations.len(), 12);
    assert_eq!(observations[0].indicator, Indicator::Cholesterol);
    assert_eq!(observations[0].cardio, 1);

    let counts = count_indicators(&observations);
    assert!(counts.iter().all(|c| c.total <= 2));
    assert_eq!(counts.iter().map(|c| c.total).sum::<u64>(), 12);
}

#[test]
fn test_totals_partition_records_per_indicator() {
    let (_dir, config) = fixture(&sample_records(50));
    let table = prepare_table(&config).unwrap();
    let counts = categorical_counts(&table).unwrap();

    let mut per_indicator: HashMap<Indicator, u64> = HashMap::new();
    for c in &counts {
        *per_indicator.entry(c.indicator).or_default() += c.total;
    }
    assert_eq!(per_indicator.len(), Indicator::ALL.len());
    assert!(per_indicator.values().all(|total| *total == 50));
}

#[test]
fn test_counts_sorted_by_indicator_value_cardio() {
    let (_dir, config) = fixture(&sample_records(20));
    let table = prepare_table(&config).unwrap();
    let counts = categorical_counts(&table).unwrap();

    let keys = counts
        .iter()
        .map(|c| (c.indicator.column(), c.value, c.cardio))
        .collect::<Vec<_>>();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(keys, sorted);
    assert_eq!(keys[0].0, "active");
}
