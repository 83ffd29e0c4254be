use std::time::Instant;

use anyhow::Context;
use log::info;
use medical_data_visualizer::{VisualizerConfig, draw_cat_plot, draw_heat_map, prepare_table};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1) {
        Some(input) => VisualizerConfig::with_input(input),
        None => VisualizerConfig::default(),
    };

    info!("Reading examinations from: {}", config.input_path.display());
    let start = Instant::now();

    let table = prepare_table(&config)
        .with_context(|| format!("preparing {}", config.input_path.display()))?;
    info!("Prepared {} records", table.num_rows());

    draw_cat_plot(&table, &config)
        .with_context(|| format!("drawing {}", config.cat_plot_path.display()))?;
    draw_heat_map(&table, &config)
        .with_context(|| format!("drawing {}", config.heat_map_path.display()))?;

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}
