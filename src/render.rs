use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::colors::colormaps::ViridisRGB;
use plotters::style::FontTransform;

use crate::analysis::detect::ArrivalPoint;
use crate::analysis::fit::FitLine;
use crate::data::model::DensityMap;

// ---------------------------------------------------------------------------
// Render configuration
// ---------------------------------------------------------------------------

/// Figure geometry and output location. The raster is a 12×8 inch figure
/// scaled by `dpi`, matching the axes the rest of the pipeline assumes.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub output: PathBuf,
    pub dpi: u32,
}

const FIG_WIDTH_IN: u32 = 12;
const FIG_HEIGHT_IN: u32 = 8;
const COLOR_BAR_WIDTH: u32 = 140;

impl RenderConfig {
    fn pixel_size(&self) -> (u32, u32) {
        (FIG_WIDTH_IN * self.dpi, FIG_HEIGHT_IN * self.dpi)
    }
}

// ---------------------------------------------------------------------------
// Heatmap + overlays
// ---------------------------------------------------------------------------

/// Render the density map as a viridis heatmap with the detected arrival
/// points (red dots) and the fitted front (white line) overlaid, then save
/// it as a PNG at `config.output`. Parent directories are created if absent.
///
/// Time runs upward (first row at the bottom); the x axis is the site index.
pub fn save_heatmap(
    map: &DensityMap,
    arrivals: &[ArrivalPoint],
    line: Option<&FitLine>,
    config: &RenderConfig,
) -> Result<()> {
    if let Some(dir) = config.output.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
        }
    }

    let (total_width, total_height) = config.pixel_size();
    draw(map, arrivals, line, &config.output, total_width, total_height)
        .with_context(|| format!("rendering {}", config.output.display()))?;

    log::info!("wrote {}", config.output.display());
    Ok(())
}

fn draw(
    map: &DensityMap,
    arrivals: &[ArrivalPoint],
    line: Option<&FitLine>,
    output: &Path,
    total_width: u32,
    total_height: u32,
) -> Result<()> {
    let n_sites = map.n_sites();
    let (min_v, max_v) = map.value_range();
    let span = if max_v > min_v { max_v - min_v } else { 1.0 };

    // Row edges sit midway between consecutive time samples, so uneven time
    // steps still tile the axis without gaps.
    let time_edges = row_edges(&map.times);
    let t_min = time_edges[0];
    let t_max = *time_edges.last().unwrap_or(&1.0);

    let x_min = -0.5;
    let x_max = n_sites as f64 - 0.5;

    let root = BitMapBackend::new(output, (total_width, total_height)).into_drawing_area();
    root.fill(&WHITE)?;
    let plot_width = total_width.saturating_sub(COLOR_BAR_WIDTH);
    let (plot_area, color_bar_area) = root.split_horizontally(plot_width);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(20)
        .caption("Spatiotemporal Evolution (Density)", ("sans-serif", 32))
        .x_label_area_size(70)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, t_min..t_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Site Index")
        .y_desc("Time")
        .x_label_style(("sans-serif", 24).into_font())
        .y_label_style(("sans-serif", 24).into_font())
        .draw()?;

    // Heatmap cells, one rectangle per (time row, site) sample.
    chart.draw_series((0..map.n_times()).flat_map(|t| {
        let time_edges = &time_edges;
        (0..n_sites).map(move |s| {
            let norm = ((map.value(t, s) - min_v) / span).clamp(0.0, 1.0);
            let color = ViridisRGB.get_color(norm);
            Rectangle::new(
                [
                    (s as f64 - 0.5, time_edges[t]),
                    (s as f64 + 0.5, time_edges[t + 1]),
                ],
                color.filled(),
            )
        })
    }))?;

    // Detected arrivals.
    chart.draw_series(arrivals.iter().map(|p| {
        Circle::new((p.site as f64, map.times[p.time_index]), 5, RED.filled())
    }))?;

    // Fitted front across the detected span, clipped to sites with arrivals.
    if let Some(line) = line {
        if let (Some(first), Some(last)) = (arrivals.first(), arrivals.last()) {
            let xs = [first.site as f64, last.site as f64];
            chart.draw_series(LineSeries::new(
                line.sample(&xs),
                WHITE.stroke_width(3),
            ))?;
        }
    }

    draw_color_bar(&color_bar_area, min_v, max_v)?;

    root.present()?;
    Ok(())
}

fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    min_v: f64,
    max_v: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (bar_width_px, bar_height_px) = area.dim_in_pixel();
    let bar_x_start = (bar_width_px as i32).saturating_sub(110);
    let top_margin = 40i32;
    let bottom_margin = 40i32;
    let usable_height = (bar_height_px as i32).saturating_sub(top_margin + bottom_margin);
    if usable_height <= 1 {
        return Ok(());
    }

    for i in 0..usable_height {
        let frac = 1.0 - i as f64 / (usable_height - 1) as f64;
        let color = ViridisRGB.get_color(frac);
        area.draw(&Rectangle::new(
            [
                (bar_x_start, top_margin + i),
                (bar_x_start + 30, top_margin + i + 1),
            ],
            color.filled(),
        ))?;
    }

    let label_count = 5.max(usable_height / 80);
    for i in 0..label_count {
        let frac = i as f64 / (label_count - 1).max(1) as f64;
        let value = min_v + (max_v - min_v) * (1.0 - frac);
        let y_pos = top_margin + (frac * (usable_height - 1) as f64) as i32;
        area.draw_text(
            &format!("{value:.2}"),
            &TextStyle::from(("sans-serif", 20).into_font()).color(&BLACK),
            (bar_x_start + 35, y_pos - 8),
        )?;
    }

    area.draw_text(
        "Density",
        &TextStyle::from(("sans-serif", 22).into_font())
            .color(&BLACK)
            .transform(FontTransform::Rotate270),
        (bar_x_start + 95, (bar_height_px / 2) as i32),
    )?;

    Ok(())
}

/// Boundaries between heatmap rows: midpoints of consecutive times, extended
/// by half a step at both ends. A single-row map gets a unit-height band.
fn row_edges(times: &[f64]) -> Vec<f64> {
    if times.len() < 2 {
        let t = times.first().copied().unwrap_or(0.0);
        return vec![t - 0.5, t + 0.5];
    }
    let mut edges = Vec::with_capacity(times.len() + 1);
    edges.push(times[0] - (times[1] - times[0]) / 2.0);
    for pair in times.windows(2) {
        edges.push((pair[0] + pair[1]) / 2.0);
    }
    let last = times.len() - 1;
    edges.push(times[last] + (times[last] - times[last - 1]) / 2.0);
    edges
}
