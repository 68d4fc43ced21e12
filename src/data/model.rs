use std::fmt;

// ---------------------------------------------------------------------------
// DensityMap – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A site-resolved density time-series: one row of per-site values for each
/// time sample. Immutable after loading; every derived quantity (arrivals,
/// fit, plot) reads from it without mutation.
#[derive(Debug, Clone)]
pub struct DensityMap {
    /// Physical time for each row, monotonically non-decreasing.
    pub times: Vec<f64>,
    /// Density rows, one per time sample; every row has `n_sites()` entries.
    pub rows: Vec<Vec<f64>>,
}

impl DensityMap {
    /// Number of time samples (rows).
    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    /// Number of spatial sites (columns).
    pub fn n_sites(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    /// Density at time row `t`, site column `s`.
    pub fn value(&self, t: usize, s: usize) -> f64 {
        self.rows[t][s]
    }

    /// Minimum and maximum density over the whole map, for colour scaling.
    /// Returns `(0.0, 1.0)` for an empty map.
    pub fn value_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for row in &self.rows {
            for &v in row {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            (0.0, 1.0)
        } else {
            (min, max)
        }
    }

    /// A copy with every density replaced by `1 − value`. Some source datasets
    /// store occupation of the complementary state; the front is then a drop,
    /// not a rise, and flipping restores the rising-edge convention the
    /// detector expects.
    pub fn flipped(&self) -> DensityMap {
        DensityMap {
            times: self.times.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|&v| 1.0 - v).collect())
                .collect(),
        }
    }
}

impl fmt::Display for DensityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} time samples × {} sites, t ∈ [{}, {}]",
            self.n_times(),
            self.n_sites(),
            self.times.first().copied().unwrap_or(f64::NAN),
            self.times.last().copied().unwrap_or(f64::NAN),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> DensityMap {
        DensityMap {
            times: vec![0.0, 0.5, 1.0],
            rows: vec![vec![0.1, 0.2], vec![0.3, 0.4], vec![0.5, 0.9]],
        }
    }

    #[test]
    fn dimensions() {
        let map = sample_map();
        assert_eq!(map.n_times(), 3);
        assert_eq!(map.n_sites(), 2);
        assert_eq!(map.value(2, 1), 0.9);
    }

    #[test]
    fn value_range_spans_extremes() {
        let (min, max) = sample_map().value_range();
        assert_eq!(min, 0.1);
        assert_eq!(max, 0.9);
    }

    #[test]
    fn flipped_complements_every_cell() {
        let flipped = sample_map().flipped();
        assert!((flipped.value(0, 0) - 0.9).abs() < 1e-12);
        assert!((flipped.value(2, 1) - 0.1).abs() < 1e-12);
        assert_eq!(flipped.times, sample_map().times);
    }
}
