//! Long-form reshaping and counting of the binary risk indicators

use std::collections::BTreeMap;
use std::time::Instant;

use arrow::record_batch::RecordBatch;

use crate::error::{Result, Stage};
use crate::schema::{CARDIO, Indicator};
use crate::utils::arrow::int_column;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// One (row, indicator) pair of the unpivoted table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorObservation {
    pub cardio: i64,
    pub indicator: Indicator,
    pub value: i64,
}

/// Number of records sharing a (`cardio`, indicator, value) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorCount {
    pub cardio: i64,
    pub indicator: Indicator,
    pub value: i64,
    pub total: u64,
}

/// Unpivot the indicator columns against `cardio`
///
/// Emits one observation per row and indicator, rows in table order and
/// indicators in [`Indicator::ALL`] order.
pub fn melt_indicators(batch: &RecordBatch) -> Result<Vec<IndicatorObservation>> {
    let cardio = int_column(batch, CARDIO, Stage::Aggregate)?;
    let columns = Indicator::ALL
        .iter()
        .map(|&indicator| {
            int_column(batch, indicator.column(), Stage::Aggregate).map(|values| (indicator, values))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut observations = Vec::with_capacity(batch.num_rows() * columns.len());
    for (row, &cardio) in cardio.values().iter().enumerate() {
        observations.extend(columns.iter().map(|(indicator, values)| IndicatorObservation {
            cardio,
            indicator: *indicator,
            value: values.value(row),
        }));
    }
    Ok(observations)
}

/// Count observations per (`cardio`, indicator, value)
///
/// The result holds one entry per observed combination, sorted by indicator
/// name, then value, then `cardio`.
#[must_use]
pub fn count_indicators(observations: &[IndicatorObservation]) -> Vec<IndicatorCount> {
    let mut groups: BTreeMap<(Indicator, i64, i64), u64> = BTreeMap::new();
    for obs in observations {
        *groups.entry((obs.indicator, obs.value, obs.cardio)).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|((indicator, value, cardio), total)| IndicatorCount {
            cardio,
            indicator,
            value,
            total,
        })
        .collect()
}

/// Unpivot and count the indicators of `batch`
pub fn categorical_counts(batch: &RecordBatch) -> Result<Vec<IndicatorCount>> {
    let start = Instant::now();
    log_operation_start(Stage::Aggregate, "counting indicator values by cardio");

    let observations = melt_indicators(batch)?;
    let counts = count_indicators(&observations);

    log_operation_complete(Stage::Aggregate, counts.len(), Some(start.elapsed()));
    Ok(counts)
}
