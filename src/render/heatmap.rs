//! Lower-triangular correlation heat map
//!
//! Cells strictly above the diagonal are masked. The diagonal itself stays
//! visible (`1.0` wherever defined), unlike an upper-triangle mask that includes the
//! diagonal and leaves it blank. Each visible cell is coloured
//! on a fixed diverging scale over `[-1, 1]` and annotated with its
//! coefficient rounded to one decimal. Undefined coefficients stay blank.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::algorithm::CorrelationMatrix;
use crate::config::FigureSize;
use crate::error::Result;
use crate::render::Figure;

const TITLE: &str = "Correlation of examination measures";

const NEGATIVE: RGBColor = RGBColor(59, 76, 192);
const POSITIVE: RGBColor = RGBColor(180, 4, 38);

const MARGIN_LEFT: i32 = 160;
const MARGIN_TOP: i32 = 60;
const MARGIN_RIGHT: i32 = 140;
const MARGIN_BOTTOM: i32 = 160;

const BAR_GAP: i32 = 30;
const BAR_WIDTH: i32 = 20;
const BAR_STEPS: i32 = 100;
const BAR_TICKS: [f64; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

/// A visible cell of the heat map
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    /// Annotation, rounded to one decimal
    pub label: String,
}

/// Cells on or below the diagonal with a defined coefficient
#[must_use]
pub fn visible_cells(matrix: &CorrelationMatrix) -> Vec<HeatmapCell> {
    let mut cells = Vec::new();
    for row in 0..matrix.len() {
        for col in 0..=row {
            let value = matrix.get(row, col);
            if value.is_nan() {
                continue;
            }
            cells.push(HeatmapCell {
                row,
                col,
                value,
                label: format!("{value:.1}"),
            });
        }
    }
    cells
}

/// Colour of `value` on the diverging scale
///
/// `-1` maps to blue, `0` to white and `1` to red; values outside the scale
/// are clamped.
#[must_use]
pub fn diverging_color(value: f64) -> RGBColor {
    let t = value.clamp(-1.0, 1.0);
    let target = if t < 0.0 { NEGATIVE } else { POSITIVE };
    let blend = |channel: u8| {
        let c = f64::from(channel);
        (255.0 + (c - 255.0) * t.abs()).round() as u8
    };
    RGBColor(blend(target.0), blend(target.1), blend(target.2))
}

/// Render the correlation matrix as an SVG heat map
pub fn render_heat_map(matrix: &CorrelationMatrix, size: FigureSize) -> Result<Figure> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size.width, size.height)).into_drawing_area();
        root.fill(&WHITE)?;
        root.draw(&Text::new(
            TITLE,
            (size.width as i32 / 2, MARGIN_TOP / 2),
            ("sans-serif", 22)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;

        let available_w = size.width as i32 - MARGIN_LEFT - MARGIN_RIGHT;
        let available_h = size.height as i32 - MARGIN_TOP - MARGIN_BOTTOM;
        let grid = available_w.min(available_h);
        if !matrix.is_empty() && grid > 0 {
            let cell = grid / matrix.len() as i32;
            if cell > 0 {
                draw_grid(&root, matrix, cell)?;
                draw_labels(&root, matrix, cell)?;
                draw_color_bar(&root, MARGIN_LEFT + cell * matrix.len() as i32 + BAR_GAP, grid / 2)?;
            }
        }

        root.present()?;
    }

    Ok(Figure::new(TITLE, size, svg))
}

fn draw_grid(root: &DrawingArea<SVGBackend<'_>, Shift>, matrix: &CorrelationMatrix, cell: i32) -> Result<()> {
    let font_size = (cell / 3).clamp(8, 16);
    for c in visible_cells(matrix) {
        let x0 = MARGIN_LEFT + c.col as i32 * cell;
        let y0 = MARGIN_TOP + c.row as i32 * cell;
        root.draw(&Rectangle::new(
            [(x0 + 1, y0 + 1), (x0 + cell - 1, y0 + cell - 1)],
            diverging_color(c.value).filled(),
        ))?;

        let text_color = if c.value.abs() < 0.5 { BLACK } else { WHITE };
        root.draw(&Text::new(
            c.label,
            (x0 + cell / 2, y0 + cell / 2),
            ("sans-serif", font_size)
                .into_font()
                .color(&text_color)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
    }
    Ok(())
}

fn draw_labels(root: &DrawingArea<SVGBackend<'_>, Shift>, matrix: &CorrelationMatrix, cell: i32) -> Result<()> {
    let bottom = MARGIN_TOP + cell * matrix.len() as i32;
    for (i, name) in matrix.columns().iter().enumerate() {
        let center = i as i32 * cell + cell / 2;
        root.draw(&Text::new(
            name.as_str(),
            (MARGIN_LEFT - 8, MARGIN_TOP + center),
            ("sans-serif", 14)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
        root.draw(&Text::new(
            name.as_str(),
            (MARGIN_LEFT + center, bottom + 8),
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90)
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }
    Ok(())
}

fn draw_color_bar(root: &DrawingArea<SVGBackend<'_>, Shift>, x: i32, height: i32) -> Result<()> {
    if height <= 0 {
        return Ok(());
    }

    // top of the bar is +1
    for step in 0..BAR_STEPS {
        let y0 = MARGIN_TOP + height * step / BAR_STEPS;
        let y1 = MARGIN_TOP + height * (step + 1) / BAR_STEPS;
        let value = 1.0 - 2.0 * (f64::from(step) + 0.5) / f64::from(BAR_STEPS);
        root.draw(&Rectangle::new(
            [(x, y0), (x + BAR_WIDTH, y1.max(y0 + 1))],
            diverging_color(value).filled(),
        ))?;
    }
    root.draw(&Rectangle::new(
        [(x, MARGIN_TOP), (x + BAR_WIDTH, MARGIN_TOP + height)],
        BLACK.stroke_width(1),
    ))?;

    for tick in BAR_TICKS {
        let y = MARGIN_TOP + ((1.0 - (tick + 1.0) / 2.0) * f64::from(height)).round() as i32;
        root.draw(&PathElement::new(
            vec![(x + BAR_WIDTH, y), (x + BAR_WIDTH + 5, y)],
            BLACK.stroke_width(1),
        ))?;
        root.draw(&Text::new(
            format!("{tick:.1}"),
            (x + BAR_WIDTH + 8, y),
            ("sans-serif", 13)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }
    Ok(())
}
