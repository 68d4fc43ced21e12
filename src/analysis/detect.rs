use crate::data::model::DensityMap;

use super::AnalysisError;

// ---------------------------------------------------------------------------
// ArrivalPoint – first threshold crossing for one site
// ---------------------------------------------------------------------------

/// The first time row at which a site's density exceeded the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalPoint {
    /// Site column index, in `[0, n_sites)`.
    pub site: usize,
    /// Row index into the time axis, in `[0, n_times)`.
    pub time_index: usize,
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Scan every site for its first threshold crossing.
///
/// For each site (in increasing site order) this returns the smallest time
/// row `t` with `value(t, site) > threshold` — strictly greater, so a value
/// sitting exactly on the threshold does not count. Sites that never cross
/// contribute no entry, so the result can be shorter than `n_sites()`.
///
/// A threshold outside the data's range is not an error: it simply yields an
/// empty (threshold too high) or full (threshold below every value) set.
pub fn detect_arrivals(map: &DensityMap, threshold: f64) -> Vec<ArrivalPoint> {
    let mut arrivals = Vec::new();
    for site in 0..map.n_sites() {
        for t in 0..map.n_times() {
            if map.value(t, site) > threshold {
                arrivals.push(ArrivalPoint { site, time_index: t });
                break;
            }
        }
    }
    arrivals
}

/// Drop the first and last arrival point.
///
/// The edge sites of a finite chain see boundary effects that distort the
/// front, so the fit excludes them. Requires at least 3 points so that at
/// least one survives; anything less is [`AnalysisError::InsufficientData`].
pub fn trim_edges(points: &[ArrivalPoint]) -> Result<Vec<ArrivalPoint>, AnalysisError> {
    if points.len() < 3 {
        return Err(AnalysisError::InsufficientData {
            need: 3,
            found: points.len(),
        });
    }
    Ok(points[1..points.len() - 1].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DensityMap;

    fn map(times: Vec<f64>, rows: Vec<Vec<f64>>) -> DensityMap {
        DensityMap { times, rows }
    }

    #[test]
    fn finds_first_crossing_per_site() {
        // 4 time rows × 3 sites, sparse signal.
        let m = map(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![
                vec![0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.3],
                vec![0.5, 0.0, 0.0],
                vec![0.0, 0.9, 0.0],
            ],
        );
        let arrivals = detect_arrivals(&m, 0.2);
        assert_eq!(
            arrivals,
            vec![
                ArrivalPoint { site: 0, time_index: 2 },
                ArrivalPoint { site: 1, time_index: 3 },
                ArrivalPoint { site: 2, time_index: 1 },
            ]
        );
    }

    #[test]
    fn keeps_only_the_first_crossing() {
        let m = map(
            vec![0.0, 1.0, 2.0],
            vec![vec![0.0], vec![0.6], vec![0.8]],
        );
        let arrivals = detect_arrivals(&m, 0.5);
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].time_index, 1);
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let m = map(vec![0.0, 1.0], vec![vec![0.2], vec![0.2000001]]);
        let arrivals = detect_arrivals(&m, 0.2);
        assert_eq!(arrivals, vec![ArrivalPoint { site: 0, time_index: 1 }]);
    }

    #[test]
    fn silent_sites_are_skipped_and_order_is_increasing() {
        let m = map(
            vec![0.0, 1.0],
            vec![vec![0.9, 0.0, 0.9], vec![0.9, 0.0, 0.9]],
        );
        let arrivals = detect_arrivals(&m, 0.5);
        let sites: Vec<usize> = arrivals.iter().map(|p| p.site).collect();
        assert_eq!(sites, vec![0, 2]);
        assert!(sites.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn detection_is_idempotent() {
        let m = map(
            vec![0.0, 1.0, 2.0],
            vec![vec![0.1, 0.4], vec![0.3, 0.1], vec![0.6, 0.2]],
        );
        assert_eq!(detect_arrivals(&m, 0.25), detect_arrivals(&m, 0.25));
    }

    #[test]
    fn too_high_threshold_yields_empty_set() {
        let m = map(vec![0.0], vec![vec![0.5, 0.5]]);
        assert!(detect_arrivals(&m, 2.0).is_empty());
    }

    #[test]
    fn trim_drops_exactly_first_and_last() {
        let points: Vec<ArrivalPoint> = (0..5)
            .map(|site| ArrivalPoint { site, time_index: site + 10 })
            .collect();
        let trimmed = trim_edges(&points).unwrap();
        assert_eq!(trimmed, points[1..4].to_vec());
    }

    #[test]
    fn trim_rejects_short_input() {
        let points = vec![
            ArrivalPoint { site: 0, time_index: 0 },
            ArrivalPoint { site: 1, time_index: 1 },
        ];
        assert_eq!(
            trim_edges(&points),
            Err(AnalysisError::InsufficientData { need: 3, found: 2 })
        );
        assert_eq!(
            trim_edges(&[]),
            Err(AnalysisError::InsufficientData { need: 3, found: 0 })
        );
    }
}
