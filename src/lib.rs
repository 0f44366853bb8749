#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod segmenter;
pub mod types;

// Building blocks of the strategies; public for tools and tests.
pub mod grid;
pub mod labels;
pub mod paths;

// Host-side helpers.
pub mod config;
pub mod io;
pub mod materialize;
pub mod transform;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{IoError, SegmentError};
pub use crate::segmenter::{segment_page, LayoutSegmenter, SegmenterParams, StrategyMode};
pub use crate::types::{Channel, Page, Rect, Segment};

pub use crate::diagnostics::{PipelineTrace, SegmentationReport};

pub use crate::materialize::{materialize_all, LocalDrawing, RedrawMaterializer, RegionMaterializer};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lead_layout::prelude::*;
///
/// # fn main() -> Result<(), SegmentError> {
/// let mut page = Page::new(800.0, 1000.0);
/// page.text_runs.push(TextRun::new("V1", Rect::new(560.0, 95.0, 580.0, 105.0)));
///
/// let report = LayoutSegmenter::new(SegmenterParams::default()).segment(&page)?;
/// println!("strategy={} segments={}", report.strategy.as_str(), report.segments.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::types::{Point, StrokeColor, TextRun, VectorPath, VectorSegment};
    pub use crate::{Channel, LayoutSegmenter, Page, Rect, SegmentError, SegmenterParams};
}

// --- Stage-level diagnostics API (for tools & advanced users) --------------

pub mod stages {
    // Stage runners.
    pub use crate::grid::{cluster_axis, infer_grid};
    pub use crate::labels::locate_labels;
    pub use crate::paths::{cluster_paths, filter_paths};
    pub use crate::segmenter::builder::{segments_from_grid, segments_from_groups};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        Axis, DropReason, DroppedGroup, Fallback, GridStage, InputDescriptor, LabelStage,
        PathGroupSummary, PathStage, Stage, StageTiming, TimingBreakdown,
    };
}
