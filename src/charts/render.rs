//! PNG rendering of planned charts with plotters.
//!
//! Bars are horizontal, the first bar of a [`ChartSpec`] sits at the top,
//! the value axis only carries integer ticks and every bar is annotated
//! with its count.

use super::{ChartSpec, Palette};
use crate::models::LabelCount;
use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Anchor colours of the viridis ramp, dark to light.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

impl Palette {
    /// Colour of bar `index` out of `total`.
    pub fn color(&self, index: usize, total: usize) -> RGBColor {
        let t = if total <= 1 {
            0.0
        } else {
            index as f64 / (total - 1) as f64
        };
        match self {
            Palette::Viridis => viridis(t),
            Palette::ViridisReversed => viridis(1.0 - t),
        }
    }
}

/// Sample the viridis ramp at `t` in `[0, 1]`.
fn viridis(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lower as f64;

    let (r0, g0, b0) = VIRIDIS[lower];
    let (r1, g1, b1) = VIRIDIS[lower + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Upper bound of the value axis, leaving room for the count labels.
fn axis_limit(max_count: usize) -> u32 {
    let max = max_count as u32;
    max + max / 5 + 1
}

/// Width in pixels reserved for bar labels.
fn label_area_width(bars: &[LabelCount]) -> u32 {
    let longest = bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0) as u32;
    (longest * 9 + 20).clamp(80, 480)
}

fn plot_error(e: impl std::fmt::Display) -> anyhow::Error {
    anyhow!("plotting backend error: {}", e)
}

/// Writes chart PNGs into one output directory.
pub struct ChartRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
}

impl ChartRenderer {
    /// Create a renderer writing `width` x `height` images into `output_dir`.
    pub fn new(output_dir: PathBuf, width: u32, height: u32) -> Self {
        Self {
            output_dir,
            size: (width, height),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it does not exist yet.
    ///
    /// Returns `true` when the directory was created.
    pub fn ensure_output_dir(&self) -> Result<bool> {
        if self.output_dir.is_dir() {
            return Ok(false);
        }

        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create chart directory: {}",
                self.output_dir.display()
            )
        })?;
        info!("Created directory: {}", self.output_dir.display());
        Ok(true)
    }

    /// Render one chart. Charts without data are skipped and return `None`.
    pub fn render(&self, spec: &ChartSpec) -> Result<Option<PathBuf>> {
        if spec.bars.is_empty() {
            warn!("Skipping '{}': no data", spec.title);
            return Ok(None);
        }

        let path = self.output_dir.join(spec.kind.file_name());
        debug!("Rendering {} bars into {}", spec.bars.len(), path.display());

        draw_horizontal_bars(&path, spec, self.size)
            .with_context(|| format!("Failed to render chart: {}", path.display()))?;

        info!("Saved chart: {}", path.display());
        Ok(Some(path))
    }
}

fn draw_horizontal_bars(path: &Path, spec: &ChartSpec, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let rows = spec.bars.len() as u32;
    let max_count = spec.bars.iter().map(|b| b.count).max().unwrap_or(0);
    let x_max = axis_limit(max_count);

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(label_area_width(&spec.bars))
        .build_cartesian_2d(0u32..x_max, (0u32..rows).into_segmented())
        .map_err(plot_error)?;

    // Row 0 is the bottom of the plot; the first bar belongs at the top.
    let row_of = |index: usize| rows - 1 - index as u32;
    let label_of = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(row) if *row < rows => {
            spec.bars[(rows - 1 - row) as usize].label.clone()
        }
        _ => String::new(),
    };
    let tick_of = |value: &u32| value.to_string();

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(spec.value_label.as_str())
        .x_labels((x_max as usize).min(10) + 1)
        .x_label_formatter(&tick_of)
        .y_labels(rows as usize)
        .y_label_formatter(&label_of)
        .label_style(("sans-serif", 16).into_font())
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(spec.bars.iter().enumerate().map(|(index, bar)| {
            let row = row_of(index);
            let color = spec.palette.color(index, spec.bars.len());
            let mut rect = Rectangle::new(
                [
                    (0, SegmentValue::Exact(row)),
                    (bar.count as u32, SegmentValue::Exact(row + 1)),
                ],
                color.filled(),
            );
            rect.set_margin(6, 6, 0, 0);
            rect
        }))
        .map_err(plot_error)?;

    let value_style = TextStyle::from(("sans-serif", 16).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));

    chart
        .draw_series(spec.bars.iter().enumerate().map(|(index, bar)| {
            EmptyElement::at((bar.count as u32, SegmentValue::CenterOf(row_of(index))))
                + Text::new(bar.count.to_string(), (6, 0), value_style.clone())
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}
