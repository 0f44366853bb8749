//! Segmenter orchestrating label lookup, strategy selection and segment
//! building.
//!
//! Modules
//! - [`params`]: configuration types (`SegmenterParams`, `StrategyMode`).
//! - [`strategy`]: the three strategies behind one trait.
//! - [`builder`]: grid cells / path groups → named segments.
//! - `pipeline`: the [`LayoutSegmenter`] entry point.
//!
//! In `Auto` mode the label grid runs when at least `min_labels` distinct
//! labels are found; otherwise path clustering takes over and the fallback is
//! recorded in the trace.

pub mod builder;
pub mod params;
mod pipeline;
pub mod strategy;

pub use params::{SegmenterParams, StrategyMode};
pub use pipeline::{segment_page, LayoutSegmenter};
pub use strategy::{
    LabelGridStrategy, PathClusterStrategy, SegmentationStrategy, StrategyInput, StrategyKind,
    UniformGridStrategy,
};
