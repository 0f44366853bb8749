//! Parameter types configuring the segmenter.
//!
//! Defaults follow the constants the layout heuristics were calibrated with;
//! tolerances and padding are in page units. Every struct deserialises with
//! `#[serde(default)]`, so configs only need to name the knobs they change.

use crate::error::SegmentError;
use crate::grid::GridInferenceParams;
use crate::paths::{PathClusterParams, PathFilterParams};
use serde::{Deserialize, Serialize};

/// Which strategy [`LayoutSegmenter`](super::LayoutSegmenter) runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyMode {
    /// Label grid when enough labels are found, path clustering otherwise.
    #[default]
    Auto,
    LabelGrid,
    PathClusters,
    Uniform,
}

/// Segmenter-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmenterParams {
    pub strategy: StrategyMode,
    /// Minimum deduplicated label count for the label grid in `Auto` mode.
    pub min_labels: usize,
    pub grid: GridInferenceParams,
    pub filter: PathFilterParams,
    pub clustering: PathClusterParams,
    /// Padding added around each path group in cluster mode.
    pub padding: f32,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            strategy: StrategyMode::Auto,
            min_labels: 6,
            grid: GridInferenceParams::default(),
            filter: PathFilterParams::default(),
            clustering: PathClusterParams::default(),
            padding: 10.0,
        }
    }
}

impl SegmenterParams {
    /// Reject values that would make the geometry meaningless.
    pub fn validate(&self) -> Result<(), SegmentError> {
        let checks: [(&'static str, f32, bool); 7] = [
            ("padding", self.padding, self.padding >= 0.0),
            (
                "grid.toleranceFraction",
                self.grid.tolerance_fraction,
                self.grid.tolerance_fraction >= 0.0,
            ),
            (
                "grid.rhythmDefaultFraction",
                self.grid.rhythm_default_fraction,
                (0.0..=1.0).contains(&self.grid.rhythm_default_fraction),
            ),
            (
                "filter.darknessThreshold",
                self.filter.darkness_threshold,
                true,
            ),
            ("filter.minWidth", self.filter.min_width, true),
            ("filter.maxHeight", self.filter.max_height, true),
            (
                "clustering.tolerance",
                self.clustering.tolerance,
                self.clustering.tolerance >= 0.0,
            ),
        ];
        for (name, value, in_range) in checks {
            if !value.is_finite() || !in_range {
                return Err(SegmentError::InvalidParams { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SegmenterParams::default().validate().is_ok());
    }

    #[test]
    fn negative_padding_is_rejected() {
        let params = SegmenterParams {
            padding: -1.0,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(SegmentError::InvalidParams {
                name: "padding",
                value: -1.0
            })
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: SegmenterParams =
            serde_json::from_str(r#"{"strategy":"path-clusters","clustering":{"tolerance":12.5}}"#)
                .expect("valid params");
        assert_eq!(params.strategy, StrategyMode::PathClusters);
        assert_eq!(params.clustering.tolerance, 12.5);
        assert_eq!(params.min_labels, 6);
        assert_eq!(params.filter, PathFilterParams::default());
    }
}
