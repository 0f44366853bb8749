//! Label-anchored inference of the channel grid.
//!
//! Label anchors are clustered per axis with a tolerance proportional to the
//! page size. The first three column clusters and the first four row clusters
//! define the cell centers; boundaries sit halfway between adjacent centers.
//! The lowest `II` label marks the rhythm strip. Every missing piece of
//! evidence is replaced by an evenly spaced default, so inference always
//! yields a full grid.

use super::cluster1d::{cluster_axis, leading_centers};
use super::layout::{even_boundaries, GridCells, GRID_COLS, GRID_ROWS};
use crate::diagnostics::{Axis, Fallback};
use crate::labels::lowest_label;
use crate::types::{Channel, LabelToken, Point, Rect};
use log::debug;
use serde::{Deserialize, Serialize};

/// Knobs for [`infer_grid`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridInferenceParams {
    /// Cluster tolerance as a fraction of the page extent along each axis.
    pub tolerance_fraction: f32,
    /// Rhythm top, as a fraction of page height, used without a usable `II` label.
    pub rhythm_default_fraction: f32,
}

impl Default for GridInferenceParams {
    fn default() -> Self {
        Self {
            tolerance_fraction: 1.0 / 20.0,
            rhythm_default_fraction: 5.0 / 6.0,
        }
    }
}

/// Where the boundaries along one axis came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisSource {
    Labels,
    EvenFallback,
}

/// Per-axis clustering summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOutcome {
    pub tolerance: f32,
    pub clusters_found: usize,
    /// Centers actually used (truncated to the grid size), empty on fallback.
    pub centers: Vec<f32>,
    pub boundaries: Vec<f32>,
    pub source: AxisSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RhythmSource {
    Label,
    DefaultFraction,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RhythmOutcome {
    pub top: f32,
    pub source: RhythmSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,
}

/// Full result of grid inference.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridInference {
    pub cells: GridCells,
    pub columns: AxisOutcome,
    pub rows: AxisOutcome,
    pub rhythm: RhythmOutcome,
    pub fallbacks: Vec<Fallback>,
}

/// Infer the 12 cells and rhythm strip from label anchors.
///
/// Never fails: under-produced axes, a missing rhythm label or inconsistent
/// boundaries fall back to even bands and are reported in `fallbacks`.
pub fn infer_grid(labels: &[LabelToken], page: &Rect, params: &GridInferenceParams) -> GridInference {
    let mut fallbacks = Vec::new();
    let tol_x = page.width() * params.tolerance_fraction;
    let tol_y = page.height() * params.tolerance_fraction;

    let xs: Vec<f32> = labels.iter().map(|t| t.anchor.x).collect();
    let ys: Vec<f32> = labels.iter().map(|t| t.anchor.y).collect();
    let col_clusters = cluster_axis(&xs, tol_x);
    let row_clusters = cluster_axis(&ys, tol_y);
    debug!(
        "infer_grid labels={} col_clusters={} row_clusters={} tol=({:.2}, {:.2})",
        labels.len(),
        col_clusters.len(),
        row_clusters.len(),
        tol_x,
        tol_y
    );

    let default_rhythm_top = page.y0 + page.height() * params.rhythm_default_fraction;

    let row_centers = if row_clusters.len() >= GRID_ROWS {
        Some(leading_centers(&row_clusters, GRID_ROWS))
    } else {
        fallbacks.push(Fallback::RowAxisUnderProduced {
            found: row_clusters.len(),
            required: GRID_ROWS,
        });
        None
    };
    let last_row_center = match &row_centers {
        Some(centers) => centers[GRID_ROWS - 1],
        // Nominal center of the last even band above the default rhythm top.
        None => {
            page.y0 + (default_rhythm_top - page.y0) * (GRID_ROWS as f32 - 0.5) / GRID_ROWS as f32
        }
    };

    let rhythm = rhythm_top(
        labels,
        page,
        last_row_center,
        default_rhythm_top,
        &mut fallbacks,
    );

    let (row_bounds, row_source) = match &row_centers {
        Some(centers) => {
            let bounds = boundaries_from_centers::<{ GRID_ROWS + 1 }>(centers, page.y0, rhythm.top);
            match bounds {
                Some(b) => (b, AxisSource::Labels),
                None => {
                    fallbacks.push(Fallback::NonMonotoneBoundaries { axis: Axis::Rows });
                    (
                        even_boundaries::<{ GRID_ROWS + 1 }>(page.y0, rhythm.top),
                        AxisSource::EvenFallback,
                    )
                }
            }
        }
        None => (
            even_boundaries::<{ GRID_ROWS + 1 }>(page.y0, rhythm.top),
            AxisSource::EvenFallback,
        ),
    };

    let col_centers = if col_clusters.len() >= GRID_COLS {
        Some(leading_centers(&col_clusters, GRID_COLS))
    } else {
        fallbacks.push(Fallback::ColumnAxisUnderProduced {
            found: col_clusters.len(),
            required: GRID_COLS,
        });
        None
    };
    let (col_bounds, col_source) = match &col_centers {
        Some(centers) => match boundaries_from_centers::<{ GRID_COLS + 1 }>(centers, page.x0, page.x1) {
            Some(b) => (b, AxisSource::Labels),
            None => {
                fallbacks.push(Fallback::NonMonotoneBoundaries {
                    axis: Axis::Columns,
                });
                (
                    even_boundaries::<{ GRID_COLS + 1 }>(page.x0, page.x1),
                    AxisSource::EvenFallback,
                )
            }
        },
        None => (
            even_boundaries::<{ GRID_COLS + 1 }>(page.x0, page.x1),
            AxisSource::EvenFallback,
        ),
    };

    let cells = GridCells::from_boundaries(page, &col_bounds, &row_bounds);
    GridInference {
        cells,
        columns: AxisOutcome {
            tolerance: tol_x,
            clusters_found: col_clusters.len(),
            centers: col_centers.unwrap_or_default(),
            boundaries: col_bounds.to_vec(),
            source: col_source,
        },
        rows: AxisOutcome {
            tolerance: tol_y,
            clusters_found: row_clusters.len(),
            centers: row_centers.unwrap_or_default(),
            boundaries: row_bounds.to_vec(),
            source: row_source,
        },
        rhythm,
        fallbacks,
    }
}

/// Rhythm top halfway between the lowest `II` label and the last grid row.
fn rhythm_top(
    labels: &[LabelToken],
    page: &Rect,
    last_row_center: f32,
    default_top: f32,
    fallbacks: &mut Vec<Fallback>,
) -> RhythmOutcome {
    let default = RhythmOutcome {
        top: default_top.clamp(page.y0, page.y1),
        source: RhythmSource::DefaultFraction,
        anchor: None,
    };
    match lowest_label(labels, Channel::II) {
        Some(tok) if usable_rhythm_anchor(tok.anchor.y, last_row_center, page) => RhythmOutcome {
            top: 0.5 * (tok.anchor.y + last_row_center),
            source: RhythmSource::Label,
            anchor: Some(tok.anchor),
        },
        Some(tok) => {
            fallbacks.push(Fallback::RhythmLabelRejected {
                anchor_y: tok.anchor.y,
                last_row_center,
            });
            default
        }
        None => {
            fallbacks.push(Fallback::RhythmLabelMissing);
            default
        }
    }
}

/// The anchor must lie on the page below the last row, and the resulting
/// midpoint must leave the rhythm strip a positive height.
fn usable_rhythm_anchor(anchor_y: f32, last_row_center: f32, page: &Rect) -> bool {
    let top = 0.5 * (anchor_y + last_row_center);
    (page.y0..=page.y1).contains(&anchor_y)
        && anchor_y > last_row_center
        && top > page.y0
        && top < page.y1
}

/// Boundaries `[start, midpoints.., end]` for `N - 1` sorted centers.
///
/// `None` unless the result is finite and strictly increasing.
fn boundaries_from_centers<const N: usize>(centers: &[f32], start: f32, end: f32) -> Option<[f32; N]> {
    if centers.len() != N - 1 {
        return None;
    }
    let mut out = [start; N];
    for i in 1..N - 1 {
        out[i] = 0.5 * (centers[i - 1] + centers[i]);
    }
    out[N - 1] = end;
    let valid = out.iter().all(|b| b.is_finite()) && out.windows(2).all(|w| w[0] < w[1]);
    valid.then_some(out)
}
