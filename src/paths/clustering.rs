//! Vertical grouping of trace paths for the label-free strategy.
//!
//! Each path is keyed by its vertical centroid (mean `y` of its segment
//! endpoints). Paths are sorted by that key and chained with the same
//! previous-value rule as [`cluster_axis`](crate::grid::cluster_axis): a gap
//! larger than the tolerance to the previous path opens a new group.

use crate::grid::cluster1d::chain_sorted;
use crate::types::{Rect, VectorPath};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathClusterParams {
    /// Maximum centroid gap between consecutive paths of one group.
    pub tolerance: f32,
}

impl Default for PathClusterParams {
    fn default() -> Self {
        Self { tolerance: 20.0 }
    }
}

/// Paths destined for one segment, in ascending centroid order.
#[derive(Clone, Debug, PartialEq)]
pub struct PathGroup {
    pub paths: Vec<VectorPath>,
    pub centroids: Vec<f32>,
}

impl PathGroup {
    pub fn min_centroid(&self) -> f32 {
        self.centroids.first().copied().unwrap_or(f32::NAN)
    }

    pub fn max_centroid(&self) -> f32 {
        self.centroids.last().copied().unwrap_or(f32::NAN)
    }

    /// Bounds of every point of every path; `None` without finite points.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(self.paths.iter().flat_map(|p| p.points()))
    }
}

/// Group `paths` top to bottom by vertical centroid.
///
/// Paths without segments have no centroid and are skipped. Ties on the
/// centroid are broken by left edge and then by input position, so the
/// grouping never depends on sort stability.
pub fn cluster_paths(paths: &[VectorPath], params: &PathClusterParams) -> Vec<PathGroup> {
    let mut keyed: Vec<(f32, (usize, &VectorPath))> = paths
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| {
            p.vertical_centroid()
                .filter(|c| c.is_finite())
                .map(|c| (c, (idx, p)))
        })
        .collect();
    keyed.sort_by(|a, b| {
        let left = |p: &VectorPath| p.bounds.map(|r| r.x0).unwrap_or(f32::INFINITY);
        a.0.total_cmp(&b.0)
            .then_with(|| left(a.1 .1).total_cmp(&left(b.1 .1)))
            .then(a.1 .0.cmp(&b.1 .0))
    });

    chain_sorted(keyed, params.tolerance)
        .into_iter()
        .map(|group| {
            let (centroids, paths) = group
                .into_iter()
                .map(|(c, (_, p))| (c, p.clone()))
                .unzip();
            PathGroup { paths, centroids }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, StrokeColor};

    fn flat_path(y: f32) -> VectorPath {
        VectorPath::polyline(
            &[Point::new(0.0, y - 2.0), Point::new(150.0, y + 2.0), Point::new(300.0, y - 2.0)],
            StrokeColor::BLACK,
        )
    }

    fn centroid_sets(groups: &[PathGroup]) -> Vec<Vec<f32>> {
        groups.iter().map(|g| g.centroids.clone()).collect()
    }

    #[test]
    fn previous_value_chaining_splits_wide_gaps() {
        let paths: Vec<VectorPath> = [300.0, 95.0, 10.0, 90.0, 35.0]
            .iter()
            .map(|&y| flat_path(y))
            .collect();
        let groups = cluster_paths(&paths, &PathClusterParams::default());
        assert_eq!(
            centroid_sets(&groups),
            vec![vec![10.0], vec![35.0], vec![90.0, 95.0], vec![300.0]]
        );
    }

    #[test]
    fn groups_do_not_overlap() {
        let paths: Vec<VectorPath> = [5.0, 18.0, 31.0, 80.0, 120.0, 139.0]
            .iter()
            .map(|&y| flat_path(y))
            .collect();
        let groups = cluster_paths(&paths, &PathClusterParams::default());
        assert_eq!(groups.len(), 3);
        for pair in groups.windows(2) {
            assert!(pair[0].max_centroid() < pair[1].min_centroid());
        }
    }

    #[test]
    fn empty_paths_are_skipped() {
        let empty = VectorPath::new(Vec::new(), StrokeColor::BLACK, Default::default());
        let groups = cluster_paths(&[empty, flat_path(40.0)], &PathClusterParams::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].paths.len(), 1);
    }

    #[test]
    fn group_bounds_cover_all_points() {
        let groups = cluster_paths(&[flat_path(50.0), flat_path(60.0)], &PathClusterParams::default());
        assert_eq!(groups[0].bounds(), Some(Rect::new(0.0, 48.0, 300.0, 62.0)));
    }
}
