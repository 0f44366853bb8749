use crate::types::Channel;
use serde::Serialize;
use std::fmt;

/// Insufficient-evidence signal recorded when a stage substitutes a
/// deterministic fallback for what it could not infer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Fallback {
    /// Too few labels for grid inference; path clustering takes over.
    #[serde(rename_all = "camelCase")]
    InsufficientLabels { found: usize, required: usize },
    /// Fewer column clusters than grid columns; even bands used instead.
    #[serde(rename_all = "camelCase")]
    ColumnAxisUnderProduced { found: usize, required: usize },
    /// Fewer row clusters than grid rows; even bands used instead.
    #[serde(rename_all = "camelCase")]
    RowAxisUnderProduced { found: usize, required: usize },
    /// Label-derived boundaries were not strictly increasing inside the page.
    #[serde(rename_all = "camelCase")]
    NonMonotoneBoundaries { axis: Axis },
    /// No `II` label at all; rhythm top defaults to a fixed page fraction.
    RhythmLabelMissing,
    /// Lowest `II` label is off the page or does not sit below the last grid row.
    #[serde(rename_all = "camelCase")]
    RhythmLabelRejected { anchor_y: f32, last_row_center: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Columns,
    Rows,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::InsufficientLabels { found, required } => write!(
                f,
                "fallback: {found} usable labels < {required} required, switching to path clustering"
            ),
            Fallback::ColumnAxisUnderProduced { found, required } => write!(
                f,
                "fallback: {found} column clusters < {required}, using even column bands"
            ),
            Fallback::RowAxisUnderProduced { found, required } => write!(
                f,
                "fallback: {found} row clusters < {required}, using even row bands"
            ),
            Fallback::NonMonotoneBoundaries { axis } => {
                let name = match axis {
                    Axis::Columns => "column",
                    Axis::Rows => "row",
                };
                write!(f, "fallback: {name} boundaries not increasing, using even bands")
            }
            Fallback::RhythmLabelMissing => {
                write!(f, "fallback: no II label, rhythm top set to default fraction")
            }
            Fallback::RhythmLabelRejected {
                anchor_y,
                last_row_center,
            } => write!(
                f,
                "fallback: lowest II label at y={anchor_y:.1} is off the page or not below last row center {last_row_center:.1}, rhythm top set to default fraction"
            ),
        }
    }
}

/// Why a candidate region never became a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropReason {
    /// Bounding box with zero width or height, or no usable points.
    Degenerate,
    /// All 13 names were already assigned.
    NamesExhausted,
}

/// Candidate region discarded by the segment builder.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedGroup {
    /// Position of the group (cluster mode) or cell (grid mode) in build order.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    pub reason: DropReason,
    pub path_count: usize,
}

impl fmt::Display for DroppedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.channel {
            Some(ch) => format!("cell {ch}"),
            None => format!("group #{}", self.index),
        };
        match self.reason {
            DropReason::Degenerate => write!(
                f,
                "dropped {what} ({} paths): degenerate geometry",
                self.path_count
            ),
            DropReason::NamesExhausted => write!(
                f,
                "dropped {what} ({} paths): all channel names assigned",
                self.path_count
            ),
        }
    }
}
