//! Segmentation strategies sharing one `(labels, paths, page) -> segments`
//! contract.
//!
//! - [`LabelGridStrategy`]: label-anchored grid inference.
//! - [`PathClusterStrategy`]: colour/shape path filtering plus vertical
//!   grouping, for pages without usable labels.
//! - [`UniformGridStrategy`]: evenly spaced grid, no evidence required.

use super::builder::{segments_from_grid, segments_from_groups};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{GridStage, PathGroupSummary, PathStage, PipelineTrace, Stage};
use crate::grid::{infer_grid, GridCells, GridInferenceParams};
use crate::paths::{cluster_paths, filter_paths, PathClusterParams, PathFilterParams};
use crate::types::{LabelToken, Page, Segment};
use serde::Serialize;
use std::time::Instant;

/// Strategy that produced a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    LabelGrid,
    PathClusters,
    Uniform,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::LabelGrid => "label-grid",
            StrategyKind::PathClusters => "path-clusters",
            StrategyKind::Uniform => "uniform",
        }
    }
}

/// Evidence available to every strategy.
#[derive(Clone, Copy, Debug)]
pub struct StrategyInput<'a> {
    pub page: &'a Page,
    /// Deduplicated channel labels.
    pub labels: &'a [LabelToken],
}

pub trait SegmentationStrategy {
    fn kind(&self) -> StrategyKind;

    /// Produce segments for `input`, recording stage details in `trace`.
    fn segment(&self, input: &StrategyInput<'_>, trace: &mut PipelineTrace) -> Vec<Segment>;
}

pub struct LabelGridStrategy<'p> {
    pub params: &'p GridInferenceParams,
}

impl SegmentationStrategy for LabelGridStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LabelGrid
    }

    fn segment(&self, input: &StrategyInput<'_>, trace: &mut PipelineTrace) -> Vec<Segment> {
        let page = &input.page.bounds;
        let inference = trace
            .timings
            .time(Stage::Grid, || infer_grid(input.labels, page, self.params));
        trace.note(format!(
            "grid: columns={} ({:?}) rows={} ({:?}) rhythm_top={:.1} ({:?})",
            inference.columns.clusters_found,
            inference.columns.source,
            inference.rows.clusters_found,
            inference.rows.source,
            inference.rhythm.top,
            inference.rhythm.source,
        ));
        for fallback in &inference.fallbacks {
            trace.fallback(fallback.clone());
        }
        trace.grid = Some(GridStage::from_inference(&inference));
        let start = Instant::now();
        let segments = segments_from_grid(&inference.cells, trace);
        trace.timings.push(Stage::Build, elapsed_ms(start));
        segments
    }
}

pub struct PathClusterStrategy<'p> {
    pub filter: &'p PathFilterParams,
    pub clustering: &'p PathClusterParams,
    pub padding: f32,
}

impl SegmentationStrategy for PathClusterStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PathClusters
    }

    fn segment(&self, input: &StrategyInput<'_>, trace: &mut PipelineTrace) -> Vec<Segment> {
        let (kept, stats) = trace
            .timings
            .time(Stage::PathFilter, || filter_paths(&input.page.paths, self.filter));
        trace.note(format!(
            "paths: total={} not_stroke={} failed_color={} failed_shape={} kept={} mode={:?}",
            stats.total,
            stats.not_stroke,
            stats.failed_color,
            stats.failed_shape,
            stats.kept,
            self.filter.mode,
        ));
        let groups = trace
            .timings
            .time(Stage::PathClustering, || cluster_paths(&kept, self.clustering));
        trace.note(format!(
            "path groups: {} (tolerance {:.1})",
            groups.len(),
            self.clustering.tolerance
        ));
        trace.paths = Some(PathStage {
            filter: stats,
            tolerance: self.clustering.tolerance,
            groups: groups.iter().map(PathGroupSummary::from_group).collect(),
        });
        let start = Instant::now();
        let segments = segments_from_groups(groups, &input.page.bounds, self.padding, trace);
        trace.timings.push(Stage::Build, elapsed_ms(start));
        segments
    }
}

pub struct UniformGridStrategy {
    /// Rhythm top as a fraction of page height.
    pub rhythm_fraction: f32,
}

impl SegmentationStrategy for UniformGridStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Uniform
    }

    fn segment(&self, input: &StrategyInput<'_>, trace: &mut PipelineTrace) -> Vec<Segment> {
        let page = &input.page.bounds;
        let rhythm_top = page.y0 + page.height() * self.rhythm_fraction;
        trace.note(format!("uniform grid: rhythm_top={rhythm_top:.1}"));
        let start = Instant::now();
        let cells = GridCells::uniform(page, rhythm_top);
        let segments = segments_from_grid(&cells, trace);
        trace.timings.push(Stage::Build, elapsed_ms(start));
        segments
    }
}
