use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use medical_data_visualizer::VisualizerConfig;
use tempfile::TempDir;

/// Header of the examination file, in file order
pub const HEADER: &str = "id,age,sex,height,weight,ap_hi,ap_lo,cholesterol,gluc,smoke,alco,active,cardio";

/// One examination record
#[derive(Debug, Clone, Copy)]
pub struct Record {
    pub id: i64,
    pub age: i64,
    pub sex: i64,
    pub height: i64,
    pub weight: f64,
    pub ap_hi: i64,
    pub ap_lo: i64,
    pub cholesterol: i64,
    pub gluc: i64,
    pub smoke: i64,
    pub alco: i64,
    pub active: i64,
    pub cardio: i64,
}

impl Record {
    /// A healthy record with every indicator at its lowest level
    #[must_use]
    pub fn baseline(id: i64) -> Self {
        Self {
            id,
            age: 18_000,
            sex: 1,
            height: 170,
            weight: 70.0,
            ap_hi: 120,
            ap_lo: 80,
            cholesterol: 1,
            gluc: 1,
            smoke: 0,
            alco: 0,
            active: 1,
            cardio: 0,
        }
    }
}

/// `n` deterministic records with variation in every column
///
/// Diastolic pressure never exceeds systolic pressure.
#[must_use]
pub fn sample_records(n: usize) -> Vec<Record> {
    (0..n as i64)
        .map(|i| Record {
            id: i,
            age: 14_000 + (i * 97) % 9_000,
            sex: 1 + i % 2,
            height: 150 + (i * 7) % 45,
            weight: 50.0 + ((i * 13) % 50) as f64,
            ap_hi: 110 + (i * 3) % 40,
            ap_lo: 70 + (i * 5) % 20,
            cholesterol: 1 + i % 3,
            gluc: 1 + (i / 2) % 3,
            smoke: i64::from(i % 4 == 0),
            alco: i64::from(i % 5 == 0),
            active: i64::from(i % 3 != 0),
            cardio: (i / 3) % 2,
        })
        .collect()
}

/// Render records as CSV text with a header row
#[must_use]
pub fn to_csv(records: &[Record]) -> String {
    let mut csv = format!("{HEADER}\n");
    for r in records {
        writeln!(
            csv,
            "{},{},{},{},{:.1},{},{},{},{},{},{},{},{}",
            r.id,
            r.age,
            r.sex,
            r.height,
            r.weight,
            r.ap_hi,
            r.ap_lo,
            r.cholesterol,
            r.gluc,
            r.smoke,
            r.alco,
            r.active,
            r.cardio
        )
        .unwrap();
    }
    csv
}

/// Write `records` to `medical_examination.csv` in `dir`
pub fn write_examinations(dir: &Path, records: &[Record]) -> PathBuf {
    let path = dir.join("medical_examination.csv");
    std::fs::write(&path, to_csv(records)).unwrap();
    path
}

/// Scratch directory holding an examination file, plus a configuration that
/// reads it and writes both figures next to it
pub fn fixture(records: &[Record]) -> (TempDir, VisualizerConfig) {
    let dir = tempfile::tempdir().unwrap();
    let input = write_examinations(dir.path(), records);
    let config = VisualizerConfig {
        cat_plot_path: dir.path().join("catplot.svg"),
        heat_map_path: dir.path().join("heatmap.svg"),
        ..VisualizerConfig::with_input(input)
    };
    (dir, config)
}
