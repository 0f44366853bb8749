//! Diagnostics data model returned with every segmentation.
//!
//! [`SegmentationReport`] is the main entry point: the segments themselves
//! plus a [`PipelineTrace`] describing which strategy ran, what each stage
//! found, which fallbacks fired and which candidate regions were dropped. The
//! trace also keeps the human-readable log lines in emission order.

pub mod fallback;
pub mod pipeline;
pub mod stages;
pub mod timing;

pub use fallback::{Axis, DropReason, DroppedGroup, Fallback};
pub use pipeline::{InputDescriptor, PipelineTrace, SegmentationReport};
pub use stages::{GridStage, LabelStage, PathGroupSummary, PathStage};
pub use timing::{Stage, StageTiming, TimingBreakdown};
