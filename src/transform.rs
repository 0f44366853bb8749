use crate::types::{Point, Rect, VectorPath};
use nalgebra::{Matrix3, Vector3};

const EPS: f32 = 1e-9;

/// Translation taking page coordinates into the frame of `rect`, whose
/// top-left corner becomes the origin.
pub fn page_to_local(rect: &Rect) -> Matrix3<f32> {
    Matrix3::new(1.0, 0.0, -rect.x0, 0.0, 1.0, -rect.y0, 0.0, 0.0, 1.0)
}

/// Uniform scale about the origin.
pub fn scale(s: f32) -> Matrix3<f32> {
    Matrix3::new(s, 0.0, 0.0, 0.0, s, 0.0, 0.0, 0.0, 1.0)
}

/// Map `p` through the homogeneous transform `m`; `None` when the result is
/// not finite or lies at infinity.
pub fn apply_transform(m: &Matrix3<f32>, p: Point) -> Option<Point> {
    let v = m * Vector3::new(p.x, p.y, 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some(Point::new(v[0] / w, v[1] / w))
}

pub fn apply_transform_points(m: &Matrix3<f32>, pts: &[Point]) -> Option<Vec<Point>> {
    pts.iter().map(|&p| apply_transform(m, p)).collect()
}

/// Map every control point of `path` through `m`, keeping colour and kind.
pub fn transform_path(m: &Matrix3<f32>, path: &VectorPath) -> Option<VectorPath> {
    let mut failed = false;
    let segments = path
        .segments
        .iter()
        .map(|seg| {
            seg.map_points(|p| {
                apply_transform(m, p).unwrap_or_else(|| {
                    failed = true;
                    p
                })
            })
        })
        .collect();
    if failed {
        return None;
    }
    Some(VectorPath::new(segments, path.color, path.kind))
}
