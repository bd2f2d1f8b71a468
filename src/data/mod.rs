//! Data layer: core types, retrieval, and window filtering.
//!
//! Architecture:
//! ```text
//!   TIC ID + flux channel
//!        │
//!        ▼
//!   ┌──────────┐      ┌────────┐
//!   │   mast    │ ──▶ │  fits  │  TIC catalog → eleanor product → table
//!   └──────────┘      └────────┘
//!        │  TargetData
//!        ▼
//!   ┌──────────┐
//!   │  fetch    │  quality == 0, divide by median → ObservationSeries
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  DisplayWindow → points to plot
//!   └──────────┘
//! ```

pub mod fetch;
pub mod filter;
pub mod fits;
pub mod mast;
pub mod model;
