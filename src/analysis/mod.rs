/// Analysis layer: arrival detection and light-cone fitting.
///
/// ```text
///   ┌──────────┐     ┌────────────┐     ┌──────────┐
///   │ DensityMap│ ──▶ │  detect     │ ──▶ │   fit     │
///   └──────────┘     │ + trim edges│     │ (normal   │
///                    └────────────┘     │  equation)│
///                                       └──────────┘
/// ```

pub mod detect;
pub mod fit;

use thiserror::Error;

/// Failures of the detection/fit stages. Loader problems surface as plain
/// `anyhow` errors; these are the numerically meaningful ones the pipeline
/// must report by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Too few arrival points for the requested operation.
    #[error("insufficient data: need at least {need} point(s), found {found}")]
    InsufficientData { need: usize, found: usize },

    /// The normal equation's 2×2 matrix is singular: every point shares the
    /// same x, so no unique line exists.
    #[error("singular normal equation: zero variance in x")]
    SingularMatrix,
}
