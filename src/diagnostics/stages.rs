use crate::grid::{AxisOutcome, GridInference, RhythmOutcome};
use crate::labels::LabelStats;
use crate::paths::{PathFilterStats, PathGroup};
use crate::types::LabelToken;
use serde::Serialize;

/// Text-layer scan: counters plus the deduplicated tokens.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStage {
    pub stats: LabelStats,
    pub tokens: Vec<LabelToken>,
}

/// Grid inference outcome without the cell rectangles themselves.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStage {
    pub columns: AxisOutcome,
    pub rows: AxisOutcome,
    pub rhythm: RhythmOutcome,
}

impl GridStage {
    pub fn from_inference(inference: &GridInference) -> Self {
        Self {
            columns: inference.columns.clone(),
            rows: inference.rows.clone(),
            rhythm: inference.rhythm.clone(),
        }
    }
}

/// Centroid span of one path group.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathGroupSummary {
    pub path_count: usize,
    pub centroid_min: f32,
    pub centroid_max: f32,
}

impl PathGroupSummary {
    pub fn from_group(group: &PathGroup) -> Self {
        Self {
            path_count: group.paths.len(),
            centroid_min: group.min_centroid(),
            centroid_max: group.max_centroid(),
        }
    }
}

/// Path filtering and grouping outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStage {
    pub filter: PathFilterStats,
    pub tolerance: f32,
    pub groups: Vec<PathGroupSummary>,
}
