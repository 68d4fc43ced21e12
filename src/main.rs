mod analysis;
mod data;
mod render;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use analysis::detect::{detect_arrivals, trim_edges};
use analysis::fit::fit;
use render::RenderConfig;
use report::FitReport;

/// Detect the excitation light cone in a spatiotemporal density table and
/// render it as a heatmap with the fitted front overlaid.
#[derive(Parser, Debug)]
#[command(name = "lightcone")]
#[command(about = "Light-cone front detection and fitting")]
struct Args {
    /// Input table: one row per time sample, first column the time value,
    /// remaining columns the per-site densities.
    #[arg(short, long)]
    input: PathBuf,

    /// Detection threshold; a site arrives at the first time its density
    /// strictly exceeds this value.
    #[arg(short, long, default_value_t = 0.1)]
    threshold: f64,

    /// Output PNG path; parent directories are created if absent.
    #[arg(short, long, default_value = "results/plots/lightcone.png")]
    output: PathBuf,

    /// Raster resolution for the 12×8 inch figure.
    #[arg(long, default_value_t = 100)]
    dpi: u32,

    /// Analyse `1 − density` instead of the raw values (for datasets that
    /// record the complementary occupation).
    #[arg(long)]
    flip: bool,

    /// Optional JSON summary of the detected arrivals and fit parameters.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let map = data::loader::load_table(&args.input)?;
    let map = if args.flip { map.flipped() } else { map };
    info!("loaded {map}");

    let arrivals = detect_arrivals(&map, args.threshold);
    info!(
        "threshold {}: arrivals at {}/{} sites",
        args.threshold,
        arrivals.len(),
        map.n_sites()
    );

    let kept = trim_edges(&arrivals).context("trimming edge arrival points")?;
    let points: Vec<(f64, f64)> = kept
        .iter()
        .map(|p| (p.site as f64, map.times[p.time_index]))
        .collect();
    let line = fit(&points).context("fitting the light-cone front")?;
    info!(
        "front: t(site) = {:.4} + {:.4}·site",
        line.intercept, line.slope
    );

    render::save_heatmap(
        &map,
        &kept,
        Some(&line),
        &RenderConfig {
            output: args.output.clone(),
            dpi: args.dpi,
        },
    )?;

    if let Some(path) = &args.report {
        let summary = FitReport::new(&map, &kept, &line, args.threshold, args.flip);
        report::write_report(&summary, path)?;
    }

    Ok(())
}
