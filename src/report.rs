use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::detect::ArrivalPoint;
use crate::analysis::fit::FitLine;
use crate::data::model::DensityMap;

// ---------------------------------------------------------------------------
// JSON summary of one pipeline run
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FitReport {
    pub threshold: f64,
    pub flipped: bool,
    pub n_times: usize,
    pub n_sites: usize,
    pub arrivals: Vec<ArrivalRecord>,
    pub fit: FitSummary,
}

#[derive(Debug, Serialize)]
pub struct ArrivalRecord {
    pub site: usize,
    pub time_index: usize,
    pub time: f64,
}

#[derive(Debug, Serialize)]
pub struct FitSummary {
    pub intercept: f64,
    pub slope: f64,
    /// Propagation speed of the front in sites per unit time, `1 / slope`.
    /// `None` when the fitted front is flat.
    pub front_velocity: Option<f64>,
}

impl FitReport {
    pub fn new(
        map: &DensityMap,
        arrivals: &[ArrivalPoint],
        line: &FitLine,
        threshold: f64,
        flipped: bool,
    ) -> Self {
        FitReport {
            threshold,
            flipped,
            n_times: map.n_times(),
            n_sites: map.n_sites(),
            arrivals: arrivals
                .iter()
                .map(|p| ArrivalRecord {
                    site: p.site,
                    time_index: p.time_index,
                    time: map.times[p.time_index],
                })
                .collect(),
            fit: FitSummary {
                intercept: line.intercept,
                slope: line.slope,
                front_velocity: if line.slope != 0.0 {
                    Some(1.0 / line.slope)
                } else {
                    None
                },
            },
        }
    }
}

/// Write the report as pretty-printed JSON, creating parent directories
/// if needed.
pub fn write_report(report: &FitReport, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating report directory {}", dir.display()))?;
        }
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_physical_times_and_velocity() {
        let map = DensityMap {
            times: vec![0.0, 0.5, 1.0],
            rows: vec![vec![0.0, 0.0], vec![0.3, 0.0], vec![0.3, 0.4]],
        };
        let arrivals = [
            ArrivalPoint { site: 0, time_index: 1 },
            ArrivalPoint { site: 1, time_index: 2 },
        ];
        let line = FitLine { intercept: 0.5, slope: 0.5 };
        let report = FitReport::new(&map, &arrivals, &line, 0.2, false);

        assert_eq!(report.arrivals.len(), 2);
        assert_eq!(report.arrivals[1].time, 1.0);
        assert_eq!(report.fit.front_velocity, Some(2.0));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"slope\":0.5"));
    }

    #[test]
    fn flat_front_has_no_velocity() {
        let map = DensityMap {
            times: vec![0.0],
            rows: vec![vec![0.0]],
        };
        let line = FitLine { intercept: 1.0, slope: 0.0 };
        let report = FitReport::new(&map, &[], &line, 0.1, true);
        assert_eq!(report.fit.front_velocity, None);
        assert!(report.flipped);
    }
}
