/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  whitespace table (.txt)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → DensityMap
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ DensityMap │  time axis + per-site density rows
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
