/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///   <dir>/*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  resolve pattern, parse files → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │ ◄── │  window   │  WindowRow text → TimeWindow
///   └──────────┘     └──────────┘
///        │                │
///        ▼                ▼
///   one Dataset      ┌──────────┐
///   per window       │  export   │  window definitions → .txt
///                    └──────────┘
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod window;
