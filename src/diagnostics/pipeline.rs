use super::{DroppedGroup, Fallback, GridStage, LabelStage, PathStage, TimingBreakdown};
use crate::segmenter::StrategyKind;
use crate::types::{Channel, Page, Rect, Segment};
use log::{debug, warn};
use serde::Serialize;

/// Result of [`LayoutSegmenter::segment`](crate::LayoutSegmenter::segment).
///
/// An empty `segments` list is a valid outcome ("found nothing"), distinct
/// from the fatal [`SegmentError`](crate::SegmentError) cases.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub strategy: StrategyKind,
    pub segments: Vec<Segment>,
    pub trace: PipelineTrace,
}

impl SegmentationReport {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `(name, rect)` pairs in emission order.
    pub fn rects(&self) -> Vec<(Channel, Rect)> {
        self.segments.iter().map(|s| (s.name, s.rect)).collect()
    }

    pub fn segment(&self, name: Channel) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub page: Rect,
    pub paths: usize,
    pub text_runs: usize,
}

impl InputDescriptor {
    pub fn from_page(page: &Page) -> Self {
        Self {
            page: page.bounds,
            paths: page.paths.len(),
            text_runs: page.text_runs.len(),
        }
    }
}

/// Stage-by-stage record of one segmentation call.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathStage>,
    pub fallbacks: Vec<Fallback>,
    pub dropped: Vec<DroppedGroup>,
    /// Human-readable diagnostics in emission order.
    pub log: Vec<String>,
}

impl PipelineTrace {
    pub fn new(input: InputDescriptor) -> Self {
        Self {
            input,
            timings: TimingBreakdown::default(),
            labels: None,
            grid: None,
            paths: None,
            fallbacks: Vec::new(),
            dropped: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn note(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!("{line}");
        self.log.push(line);
    }

    pub fn fallback(&mut self, fallback: Fallback) {
        let line = fallback.to_string();
        warn!("{line}");
        self.log.push(line);
        self.fallbacks.push(fallback);
    }

    pub fn drop_group(&mut self, dropped: DroppedGroup) {
        self.note(dropped.to_string());
        self.dropped.push(dropped);
    }
}
