use super::AnalysisError;

// ---------------------------------------------------------------------------
// FitLine – least-squares line through the arrival front
// ---------------------------------------------------------------------------

/// Parameters of the fitted light-cone front, `y = intercept + slope · x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitLine {
    pub intercept: f64,
    pub slope: f64,
}

impl FitLine {
    /// Evaluate the line at a single x.
    pub fn y(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Evaluate the line over a set of sample positions. Lazy and
    /// restartable: each call walks `xs` afresh. Used only for rendering.
    pub fn sample<'a>(&'a self, xs: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
        xs.iter().map(move |&x| (x, self.y(x)))
    }
}

// ---------------------------------------------------------------------------
// Ordinary least squares via the normal equation
// ---------------------------------------------------------------------------

/// Fit `y ≈ intercept + slope · x` through the given points.
///
/// Solves the 2×2 normal-equation system
/// ```text
/// | n    Σx  | |intercept|   | Σy  |
/// | Σx   Σx² | |  slope  | = | Σxy |
/// ```
/// in closed form. Exact and deterministic; no iteration.
///
/// Fails with [`AnalysisError::InsufficientData`] on fewer than 2 points and
/// with [`AnalysisError::SingularMatrix`] when all x coincide (determinant
/// `n·Σx² − (Σx)²` is zero, so no unique line exists).
pub fn fit(points: &[(f64, f64)]) -> Result<FitLine, AnalysisError> {
    if points.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            need: 2,
            found: points.len(),
        });
    }

    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|&(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|&(_, y)| y).sum();
    let sum_xx: f64 = points.iter().map(|&(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|&(x, y)| x * y).sum();

    let det = n * sum_xx - sum_x * sum_x;
    if det == 0.0 {
        return Err(AnalysisError::SingularMatrix);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / det;
    let intercept = (sum_y * sum_xx - sum_x * sum_xy) / det;

    Ok(FitLine { intercept, slope })
}
