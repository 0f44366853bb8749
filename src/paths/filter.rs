//! Selection of stroke paths that plausibly belong to a trace.
//!
//! Two predicates are available:
//! - colour: the summed RGB intensity is below `darkness_threshold`, which
//!   separates dark ink from light gridlines;
//! - shape: the bounds are wide and flat (`width > min_width`,
//!   `height < max_height`), which separates long trace runs from ticks,
//!   borders and calibration marks.
//!
//! Only [`PathKind::Stroke`] paths are ever considered.

use crate::types::{PathKind, VectorPath};
use serde::{Deserialize, Serialize};

/// How the colour and shape predicates combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathFilterMode {
    Color,
    Shape,
    #[default]
    ColorAndShape,
    ColorOrShape,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathFilterParams {
    pub mode: PathFilterMode,
    /// Upper bound (exclusive) of `r + g + b` on a 0–3 scale.
    pub darkness_threshold: f32,
    /// Lower bound (exclusive) of the bounds width.
    pub min_width: f32,
    /// Upper bound (exclusive) of the bounds height.
    pub max_height: f32,
}

impl Default for PathFilterParams {
    fn default() -> Self {
        Self {
            mode: PathFilterMode::default(),
            darkness_threshold: 2.0,
            min_width: 200.0,
            max_height: 50.0,
        }
    }
}

impl PathFilterParams {
    pub fn passes_color(&self, path: &VectorPath) -> bool {
        path.color.darkness_sum() < self.darkness_threshold
    }

    pub fn passes_shape(&self, path: &VectorPath) -> bool {
        path.bounds
            .map(|b| b.width() > self.min_width && b.height() < self.max_height)
            .unwrap_or(false)
    }

    /// Whether `path` qualifies as trace ink under the active mode.
    pub fn accepts(&self, path: &VectorPath) -> bool {
        if path.kind != PathKind::Stroke {
            return false;
        }
        match self.mode {
            PathFilterMode::Color => self.passes_color(path),
            PathFilterMode::Shape => self.passes_shape(path),
            PathFilterMode::ColorAndShape => self.passes_color(path) && self.passes_shape(path),
            PathFilterMode::ColorOrShape => self.passes_color(path) || self.passes_shape(path),
        }
    }
}

/// Counters emitted by [`filter_paths`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathFilterStats {
    pub total: usize,
    pub not_stroke: usize,
    pub failed_color: usize,
    pub failed_shape: usize,
    pub kept: usize,
}

/// Keep the paths accepted by `params`, preserving input order.
pub fn filter_paths(paths: &[VectorPath], params: &PathFilterParams) -> (Vec<VectorPath>, PathFilterStats) {
    let mut stats = PathFilterStats {
        total: paths.len(),
        ..Default::default()
    };
    let mut kept = Vec::new();
    for path in paths {
        if path.kind != PathKind::Stroke {
            stats.not_stroke += 1;
            continue;
        }
        if !params.passes_color(path) {
            stats.failed_color += 1;
        }
        if !params.passes_shape(path) {
            stats.failed_shape += 1;
        }
        if params.accepts(path) {
            kept.push(path.clone());
        }
    }
    stats.kept = kept.len();
    (kept, stats)
}
