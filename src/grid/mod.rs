//! Channel-grid inference from label positions.
//!
//! - [`cluster1d`]: previous-value gap clustering along one axis.
//! - [`layout`]: the 4×3 cell grid plus rhythm strip.
//! - [`inference`]: label-anchored boundaries with even-band fallbacks.

pub mod cluster1d;
pub mod inference;
pub mod layout;

pub use cluster1d::{cluster_axis, AxisCluster};
pub use inference::{
    infer_grid, AxisOutcome, AxisSource, GridInference, GridInferenceParams, RhythmOutcome,
    RhythmSource,
};
pub use layout::{GridCells, GRID_COLS, GRID_ROWS};
