//! Segmenter entry point and strategy selection.
//!
//! Typical usage:
//! ```no_run
//! use lead_layout::{LayoutSegmenter, SegmenterParams};
//! use lead_layout::types::Page;
//!
//! # fn example(page: &Page) -> Result<(), lead_layout::SegmentError> {
//! let segmenter = LayoutSegmenter::new(SegmenterParams::default());
//! let report = segmenter.segment(page)?;
//! for seg in &report.segments {
//!     println!("{} {:?}", seg.name, seg.rect);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::{SegmenterParams, StrategyMode};
use super::strategy::{
    LabelGridStrategy, PathClusterStrategy, SegmentationStrategy, StrategyInput,
    UniformGridStrategy,
};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    Fallback, InputDescriptor, LabelStage, PipelineTrace, SegmentationReport, Stage,
};
use crate::error::SegmentError;
use crate::labels::locate_labels;
use crate::types::Page;
use log::debug;
use std::time::Instant;

/// Splits a chart page into per-channel regions.
///
/// Holds only immutable parameters; every call to [`segment`](Self::segment)
/// is independent and side-effect free.
#[derive(Clone, Debug, Default)]
pub struct LayoutSegmenter {
    params: SegmenterParams,
}

impl LayoutSegmenter {
    pub fn new(params: SegmenterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SegmenterParams {
        &self.params
    }

    /// Segment `page` with the configured strategy.
    ///
    /// Errors only on an unusable page rectangle or invalid parameters. A page
    /// without labels or qualifying strokes yields an empty report.
    pub fn segment(&self, page: &Page) -> Result<SegmentationReport, SegmentError> {
        validate_page(page)?;
        self.params.validate()?;
        let total_start = Instant::now();
        debug!(
            "LayoutSegmenter::segment start page={:?} paths={} runs={}",
            page.bounds,
            page.paths.len(),
            page.text_runs.len()
        );

        let mut trace = PipelineTrace::new(InputDescriptor::from_page(page));
        let (labels, stats) = trace
            .timings
            .time(Stage::Labels, || locate_labels(&page.text_runs));
        trace.note(format!(
            "labels: runs={} matched={} duplicates={} kept={}",
            stats.runs_scanned, stats.matched, stats.duplicates_removed, stats.kept
        ));

        let p = &self.params;
        let label_grid = LabelGridStrategy { params: &p.grid };
        let path_clusters = PathClusterStrategy {
            filter: &p.filter,
            clustering: &p.clustering,
            padding: p.padding,
        };
        let uniform = UniformGridStrategy {
            rhythm_fraction: p.grid.rhythm_default_fraction,
        };
        let strategy: &dyn SegmentationStrategy = match p.strategy {
            StrategyMode::Auto if labels.len() >= p.min_labels => &label_grid,
            StrategyMode::Auto => {
                trace.fallback(Fallback::InsufficientLabels {
                    found: labels.len(),
                    required: p.min_labels,
                });
                &path_clusters
            }
            StrategyMode::LabelGrid => &label_grid,
            StrategyMode::PathClusters => &path_clusters,
            StrategyMode::Uniform => &uniform,
        };
        trace.note(format!(
            "strategy: {} (mode {:?}, labels={}, paths={})",
            strategy.kind().as_str(),
            p.strategy,
            labels.len(),
            page.paths.len()
        ));

        let input = StrategyInput {
            page,
            labels: &labels,
        };
        let segments = strategy.segment(&input, &mut trace);
        trace.labels = Some(LabelStage {
            stats,
            tokens: labels,
        });
        if segments.is_empty() {
            trace.note("result: no segments produced");
        } else {
            let names: Vec<&str> = segments.iter().map(|s| s.name.as_str()).collect();
            trace.note(format!(
                "result: {} segments [{}]",
                segments.len(),
                names.join(", ")
            ));
        }
        trace.timings.total_ms = elapsed_ms(total_start);

        Ok(SegmentationReport {
            strategy: strategy.kind(),
            segments,
            trace,
        })
    }
}

/// Segment `page` with default parameters.
pub fn segment_page(page: &Page) -> Result<SegmentationReport, SegmentError> {
    LayoutSegmenter::default().segment(page)
}

fn validate_page(page: &Page) -> Result<(), SegmentError> {
    let b = &page.bounds;
    if !b.is_finite() || b.is_degenerate() {
        return Err(SegmentError::InvalidPage {
            width: b.width(),
            height: b.height(),
        });
    }
    Ok(())
}
