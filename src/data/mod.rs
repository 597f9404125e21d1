//! Data layer: core types, loading, and outlier filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → IceDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ IceDataset │  Vec<Observation { year, month, extent }>
//!   └────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  drop extents at or below mean − k·σ
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
