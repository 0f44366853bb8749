//! One-dimensional gap clustering shared by grid inference and path grouping.
//!
//! Values are sorted and merged in a single left-to-right pass. A value joins
//! the open cluster when it lies within `tol` of the previous raw value, so a
//! chain of closely spaced points may drift further than `tol` from the
//! cluster mean and still stay together.

use serde::Serialize;

/// Ordered group of 1D values whose adjacent gaps are all `<= tol`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisCluster {
    pub values: Vec<f32>,
}

impl AxisCluster {
    /// Mean of the member values.
    pub fn center(&self) -> f32 {
        if self.values.is_empty() {
            return f32::NAN;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        (sum / self.values.len() as f64) as f32
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> f32 {
        self.values.first().copied().unwrap_or(f32::NAN)
    }

    pub fn max(&self) -> f32 {
        self.values.last().copied().unwrap_or(f32::NAN)
    }
}

/// Cluster `values` along one axis.
///
/// Non-finite values are ignored. A tolerance `<= 0` (or NaN) yields one
/// cluster per distinct value. The result is sorted by ascending center.
pub fn cluster_axis(values: &[f32], tol: f32) -> Vec<AxisCluster> {
    let mut sorted: Vec<(f32, ())> = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| (v, ()))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    chain_sorted(sorted, tol)
        .into_iter()
        .map(|group| AxisCluster {
            values: group.into_iter().map(|(v, _)| v).collect(),
        })
        .collect()
}

/// Split keyed items, already sorted by key, wherever the gap to the
/// previous key exceeds `tol`.
pub(crate) fn chain_sorted<T>(sorted: Vec<(f32, T)>, tol: f32) -> Vec<Vec<(f32, T)>> {
    let tol = if tol.is_nan() { 0.0 } else { tol.max(0.0) };
    let mut groups: Vec<Vec<(f32, T)>> = Vec::new();
    let mut cur: Vec<(f32, T)> = Vec::new();
    for item in sorted {
        match cur.last() {
            Some(&(prev, _)) if item.0 - prev > tol => {
                groups.push(std::mem::take(&mut cur));
                cur.push(item);
            }
            _ => cur.push(item),
        }
    }
    if !cur.is_empty() {
        groups.push(cur);
    }
    groups
}

/// Centers of `clusters`, keeping at most `keep` of them from the start.
pub fn leading_centers(clusters: &[AxisCluster], keep: usize) -> Vec<f32> {
    clusters.iter().take(keep).map(AxisCluster::center).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widely_spaced_values_form_singletons() {
        let values = [40.0, 10.0, 100.0, 70.0];
        let clusters = cluster_axis(&values, 5.0);
        assert_eq!(clusters.len(), 4);
        let centers: Vec<f32> = clusters.iter().map(|c| c.center()).collect();
        assert_eq!(centers, vec![10.0, 40.0, 70.0, 100.0]);
    }

    #[test]
    fn chains_follow_previous_value_not_mean() {
        // Each gap is 8 (<= 10) although the last value is 24 away from the first.
        let clusters = cluster_axis(&[0.0, 8.0, 16.0, 24.0, 60.0], 10.0);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].values, vec![0.0, 8.0, 16.0, 24.0]);
        assert_eq!(clusters[1].values, vec![60.0]);
        assert_eq!(clusters[0].center(), 12.0);
    }

    #[test]
    fn clusters_partition_the_input() {
        let values = [5.0, 3.0, 50.0, 4.0, 48.0, 200.0, 3.0];
        let clusters = cluster_axis(&values, 2.5);
        let total: usize = clusters.iter().map(AxisCluster::len).sum();
        assert_eq!(total, values.len());
        for pair in clusters.windows(2) {
            assert!(pair[0].center() < pair[1].center());
            assert!(pair[0].max() < pair[1].min());
        }
    }

    #[test]
    fn non_positive_tolerance_splits_distinct_values() {
        let clusters = cluster_axis(&[1.0, 1.0, 2.0, 2.5], 0.0);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].values, vec![1.0, 1.0]);
        let clusters = cluster_axis(&[1.0, 1.0, 2.0], -3.0);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn empty_and_non_finite_inputs() {
        assert!(cluster_axis(&[], 1.0).is_empty());
        let clusters = cluster_axis(&[f32::NAN, 1.0, f32::INFINITY], 1.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].values, vec![1.0]);
    }

    #[test]
    fn leading_centers_truncates_excess() {
        let clusters = cluster_axis(&[0.0, 10.0, 20.0, 30.0, 40.0], 1.0);
        assert_eq!(leading_centers(&clusters, 3), vec![0.0, 10.0, 20.0]);
    }
}
