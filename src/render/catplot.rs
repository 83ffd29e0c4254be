//! Faceted grouped bar chart of indicator counts
//!
//! One panel per `cardio` value, one bar group per indicator and one bar per
//! indicator value. Combinations that never occur get no bar at all.

use itertools::Itertools;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::algorithm::IndicatorCount;
use crate::config::FigureSize;
use crate::error::Result;
use crate::render::Figure;
use crate::schema::Indicator;

const TITLE: &str = "Risk factor counts by cardiovascular disease status";

const PALETTE: [RGBColor; 3] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
];

/// A single bar, addressed by facet, category and hue index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub facet: usize,
    pub category: usize,
    pub hue: usize,
    pub total: u64,
}

/// Axis levels and bars of the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatPlotLayout {
    /// Distinct `cardio` values, ascending
    pub facets: Vec<i64>,
    /// Distinct indicators, by name
    pub categories: Vec<Indicator>,
    /// Distinct indicator values, ascending
    pub hues: Vec<i64>,
    pub bars: Vec<Bar>,
}

impl CatPlotLayout {
    /// Largest bar height
    #[must_use]
    pub fn max_total(&self) -> u64 {
        self.bars.iter().map(|b| b.total).max().unwrap_or(0)
    }
}

/// Lay out one bar per count row
#[must_use]
pub fn bar_specs(counts: &[IndicatorCount]) -> CatPlotLayout {
    let facets = counts.iter().map(|c| c.cardio).sorted().dedup().collect::<Vec<_>>();
    let categories = counts.iter().map(|c| c.indicator).sorted().dedup().collect::<Vec<_>>();
    let hues = counts.iter().map(|c| c.value).sorted().dedup().collect::<Vec<_>>();

    let bars = counts
        .iter()
        .filter_map(|c| {
            Some(Bar {
                facet: facets.binary_search(&c.cardio).ok()?,
                category: categories.binary_search(&c.indicator).ok()?,
                hue: hues.binary_search(&c.value).ok()?,
                total: c.total,
            })
        })
        .collect();

    CatPlotLayout {
        facets,
        categories,
        hues,
        bars,
    }
}

/// Render the bar chart as an SVG figure
pub fn render_cat_plot(counts: &[IndicatorCount], size: FigureSize) -> Result<Figure> {
    let layout = bar_specs(counts);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size.width, size.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(TITLE, ("sans-serif", 22))?;

        if !layout.facets.is_empty() {
            let y_max = (layout.max_total() as f64 * 1.1).ceil() as u64 + 1;
            let panels = root.split_evenly((1, layout.facets.len()));
            let last = layout.facets.len() - 1;
            for (facet, panel) in panels.iter().enumerate() {
                draw_facet(panel, &layout, facet, y_max, facet == last)?;
            }
        }

        root.present()?;
    }

    Ok(Figure::new(TITLE, size, svg))
}

fn draw_facet(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    layout: &CatPlotLayout,
    facet: usize,
    y_max: u64,
    with_legend: bool,
) -> Result<()> {
    let n = layout.categories.len();
    let names = layout.categories.iter().map(|c| c.column()).collect::<Vec<_>>();
    let category_label = |x: &f64| {
        let nearest = x.round();
        if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
            return String::new();
        }
        names
            .get(nearest as usize)
            .map(|name| (*name).to_string())
            .unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(area)
        .caption(format!("cardio = {}", layout.facets[facet]), ("sans-serif", 18))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&category_label)
        .x_desc("variable")
        .y_desc("total")
        .draw()?;

    let width = 0.8 / layout.hues.len() as f64;
    for (hue, value) in layout.hues.iter().enumerate() {
        let color = PALETTE[hue % PALETTE.len()];
        let bars = layout
            .bars
            .iter()
            .filter(|b| b.facet == facet && b.hue == hue)
            .map(|b| {
                let x0 = b.category as f64 - 0.4 + width * hue as f64;
                Rectangle::new([(x0, 0), (x0 + width, b.total)], color.filled())
            });

        let series = chart.draw_series(bars)?;
        if with_legend {
            series
                .label(format!("value = {value}"))
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}
