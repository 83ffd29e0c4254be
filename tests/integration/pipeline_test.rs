use crate::utils::{Record, fixture, sample_records};
use medical_data_visualizer::schema::{CHOLESTEROL, GLUC, OVERWEIGHT};
use medical_data_visualizer::utils::arrow::int_column;
use medical_data_visualizer::{
    Stage, VisualizerConfig, VisualizerError, draw_cat_plot, draw_heat_map, prepare_table,
};

#[test]
fn test_end_to_end_writes_both_figures() {
    let (_dir, config) = fixture(&sample_records(60));

    let table = prepare_table(&config).unwrap();
    assert_eq!(table.num_rows(), 60);

    let cat_plot = draw_cat_plot(&table, &config).unwrap();
    let heat_map = draw_heat_map(&table, &config).unwrap();

    let written = std::fs::read_to_string(&config.cat_plot_path).unwrap();
    assert_eq!(written, cat_plot.svg());
    assert!(written.contains("<svg"));

    let written = std::fs::read_to_string(&config.heat_map_path).unwrap();
    assert_eq!(written, heat_map.svg());
    assert!(written.contains("overweight"));
}

#[test]
fn test_figures_can_be_drawn_in_either_order() {
    let (_dir, config) = fixture(&sample_records(30));
    let table = prepare_table(&config).unwrap();

    let heat_map = draw_heat_map(&table, &config).unwrap();
    let cat_plot = draw_cat_plot(&table, &config).unwrap();

    // the table is only read, so a second run gives identical figures
    assert_eq!(draw_heat_map(&table, &config).unwrap(), heat_map);
    assert_eq!(draw_cat_plot(&table, &config).unwrap(), cat_plot);
}

#[test]
fn test_overweight_scenario() {
    let records = [(160, 60.0), (170, 70.0), (180, 80.0), (190, 200.0)]
        .iter()
        .enumerate()
        .map(|(i, &(height, weight))| Record {
            height,
            weight,
            ..Record::baseline(i as i64)
        })
        .collect::<Vec<_>>();
    let (_dir, config) = fixture(&records);

    let table = prepare_table(&config).unwrap();
    let overweight = int_column(&table, OVERWEIGHT, Stage::Derive).unwrap();
    assert_eq!(&overweight.values()[..], &[0, 0, 0, 1]);
}

#[test]
fn test_ordinal_columns_are_binary() {
    let (_dir, config) = fixture(&sample_records(12));
    let table = prepare_table(&config).unwrap();

    let cholesterol = int_column(&table, CHOLESTEROL, Stage::Derive).unwrap();
    let gluc = int_column(&table, GLUC, Stage::Derive).unwrap();
    // sample levels cycle through 1, 2, 3
    assert_eq!(&cholesterol.values()[..3], &[0, 1, 1]);
    assert!(gluc.values().iter().all(|v| *v == 0 || *v == 1));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = VisualizerConfig::with_input(dir.path().join("absent.csv"));

    let err = prepare_table(&config).unwrap_err();
    assert!(matches!(err, VisualizerError::DataLoad { .. }));
    assert_eq!(err.stage(), Stage::Load);
}

#[test]
fn test_unwritable_output_path() {
    let (dir, mut config) = fixture(&sample_records(10));
    config.cat_plot_path = dir.path().join("missing").join("catplot.svg");

    let table = prepare_table(&config).unwrap();
    let err = draw_cat_plot(&table, &config).unwrap_err();
    assert!(matches!(err, VisualizerError::Render(_)));
    assert!(!config.cat_plot_path.exists());
}
