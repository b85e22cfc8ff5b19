/// Data layer: core types, loading, filtering, and trend computation.
///
/// Architecture:
/// ```text
///   cache dir (*.csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + normalize rows → IceSeries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ IceSeries │  sorted observations, region labels, year bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region + year-range predicate → owned subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  trend    │  yearly mean / OLS overlay → RenderBundle
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod trend;
