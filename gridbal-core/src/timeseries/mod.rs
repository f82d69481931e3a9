//! Time-series utilities shared by the balance engine and orchestrator.
//!
//! Modules include:
//! - `grid`: canonical timeline, snapping and settlement periods
//! - `infer`: infer the native step of a raw series
//! - `align`: resample raw series onto the grid and forward-fill gaps
/// Resampling and bounded forward-fill onto the canonical grid.
pub mod align;
/// Canonical fixed-step timeline.
pub mod grid;
/// Native step inference.
pub mod infer;
