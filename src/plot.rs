use std::fmt::Write as _;
use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::config::PipelineConfig;
use crate::data::model::NumericTable;
use crate::error::{PipelineError, Result};

/// Upper bound on the number of x ticks.
const X_TICKS: usize = 10;
const TICK_FONT_SIZE: u32 = 14;

/// A tick label placed on the finished SVG, in pixels.
#[derive(Debug, Clone, PartialEq)]
struct TickLabel {
    text: String,
    x: i32,
    y: i32,
}

// ---------------------------------------------------------------------------
// Spectrum plot (one SVG per table)
// ---------------------------------------------------------------------------

/// Render one table as a line plot and write it to `path`.
///
/// The figure is drawn into an in-memory buffer that is dropped as soon as
/// the file is written, so rendering many tables never holds more than one
/// figure at a time.
pub fn render_table(table: &NumericTable, path: &Path, config: &PipelineConfig) -> Result<()> {
    let svg = render_svg(table, config).map_err(|message| PipelineError::Plot {
        path: path.to_path_buf(),
        message,
    })?;
    std::fs::write(path, svg).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Draw the chart and return the SVG document.
fn render_svg(table: &NumericTable, config: &PipelineConfig) -> std::result::Result<String, String> {
    let x_range = axis_range(table.x.iter().copied(), false)
        .ok_or_else(|| format!("{} values span too wide a range to plot", table.columns[0]))?;
    let y_range = axis_range(table.y.iter().copied(), true)
        .ok_or_else(|| format!("{} values span too wide a range to plot", table.columns[1]))?;

    let mut svg = String::new();
    let labels = {
        let root = SVGBackend::with_string(&mut svg, config.figure_size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&table.identifier, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range.clone(), y_range.clone())
            .map_err(|e| e.to_string())?;

        // x tick labels are added afterwards, rotated, by `add_tick_labels`.
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(X_TICKS)
            .x_label_formatter(&|_| String::new())
            .x_desc(table.columns[0].as_str())
            .y_desc(table.columns[1].as_str())
            .y_label_style(("sans-serif", TICK_FONT_SIZE))
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(DottedLineSeries::new(
                vec![(x_range.start, 0.0), (x_range.end, 0.0)],
                0,
                6,
                |c| Circle::new(c, 1, BLACK.filled()),
            ))
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(LineSeries::new(table.points(), &BLUE))
            .map_err(|e| e.to_string())?;

        let ticks = chart.as_coord_spec().x_spec().key_points(X_TICKS);
        let decimals = tick_decimals(&ticks, &x_range);
        let labels: Vec<TickLabel> = ticks
            .iter()
            .map(|&v| {
                let (x, y) = chart.backend_coord(&(v, y_range.start));
                TickLabel {
                    text: format!("{v:.decimals$}"),
                    x,
                    y: y + 12,
                }
            })
            .collect();

        root.present().map_err(|e| e.to_string())?;
        labels
    };

    Ok(add_tick_labels(svg, &labels))
}

/// Insert x tick labels tilted 45° counter-clockwise, each anchored at its
/// right end just below the tick.
fn add_tick_labels(mut svg: String, labels: &[TickLabel]) -> String {
    let mut texts = String::new();
    for label in labels {
        let TickLabel { text, x, y } = label;
        // Writing into a String cannot fail.
        let _ = writeln!(
            texts,
            r##"<text x="{x}" y="{y}" font-family="sans-serif" font-size="{TICK_FONT_SIZE}" fill="#000000" text-anchor="end" transform="rotate(-45, {x}, {y})">{text}</text>"##
        );
    }

    match svg.rfind("</svg>") {
        Some(end) => svg.insert_str(end, &texts),
        None => svg.push_str(&texts),
    }
    svg
}

/// Digits after the decimal point needed to tell neighbouring ticks apart.
fn tick_decimals(ticks: &[f64], range: &Range<f64>) -> usize {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => (range.end - range.start) / X_TICKS as f64,
    };
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    let mut decimals = (-step.log10() - 1e-9).ceil().max(0.0) as usize;
    while decimals < 6 {
        let scaled = step * 10f64.powi(decimals as i32);
        if (scaled - scaled.round()).abs() < 1e-6 * scaled.max(1.0) {
            break;
        }
        decimals += 1;
    }
    decimals
}

/// Data extent plus 5 % on each side.  Degenerate extents get a unit span.
/// `None` when the padded extent does not fit in an `f64`.
fn axis_range(values: impl Iterator<Item = f64>, include_zero: bool) -> Option<Range<f64>> {
    let (mut lo, mut hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Some(0.0..1.0);
    }
    if hi - lo < f64::EPSILON {
        return Some((lo - 0.5)..(hi + 0.5));
    }

    let pad = (hi - lo) * 0.05;
    let (start, end) = (lo - pad, hi + pad);
    (start.is_finite() && end.is_finite()).then_some(start..end)
}
