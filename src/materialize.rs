//! Turning segments into standalone drawings.
//!
//! The engine only produces rectangles and, for clustered segments, the owned
//! paths. A [`RegionMaterializer`] turns each segment into whatever the host
//! stores. [`RedrawMaterializer`] replays paths in the segment's local frame,
//! origin at the rect's top-left corner.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::transform::{page_to_local, transform_path};
use crate::types::{Channel, Page, PathKind, Segment, VectorPath};
use log::debug;
use serde::Serialize;

/// Host seam producing one output per segment.
pub trait RegionMaterializer {
    type Output: Send;

    /// `None` skips the segment.
    fn materialize(&self, page: &Page, segment: &Segment) -> Option<Self::Output>;
}

/// Segment content redrawn in local coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDrawing {
    pub name: Channel,
    pub width: f32,
    pub height: f32,
    pub paths: Vec<VectorPath>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RedrawMaterializer;

impl RedrawMaterializer {
    /// Page strokes whose bounds center lies inside `segment.rect`; used when
    /// the segment owns no paths.
    fn select_page_paths<'a>(page: &'a Page, segment: &Segment) -> Vec<&'a VectorPath> {
        page.paths
            .iter()
            .filter(|p| p.kind == PathKind::Stroke)
            .filter(|p| {
                p.bounds
                    .map(|b| segment.rect.contains(&b.center()))
                    .unwrap_or(false)
            })
            .collect()
    }
}

impl RegionMaterializer for RedrawMaterializer {
    type Output = LocalDrawing;

    fn materialize(&self, page: &Page, segment: &Segment) -> Option<LocalDrawing> {
        let rect = segment.rect;
        if rect.is_degenerate() {
            return None;
        }
        let m = page_to_local(&rect);
        let source: Vec<&VectorPath> = match &segment.paths {
            Some(owned) => owned.iter().collect(),
            None => Self::select_page_paths(page, segment),
        };
        let paths: Vec<VectorPath> = source
            .into_iter()
            .filter_map(|p| transform_path(&m, p))
            .collect();
        debug!(
            "RedrawMaterializer: {} -> {} paths in {:.1}x{:.1}",
            segment.name,
            paths.len(),
            rect.width(),
            rect.height()
        );
        Some(LocalDrawing {
            name: segment.name,
            width: rect.width(),
            height: rect.height(),
            paths,
        })
    }
}

/// Materialize every segment, preserving segment order.
pub fn materialize_all<M>(materializer: &M, page: &Page, segments: &[Segment]) -> Vec<M::Output>
where
    M: RegionMaterializer + Sync,
{
    #[cfg(feature = "parallel")]
    {
        segments
            .par_iter()
            .filter_map(|seg| materializer.materialize(page, seg))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        segments
            .iter()
            .filter_map(|seg| materializer.materialize(page, seg))
            .collect()
    }
}
