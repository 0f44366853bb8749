//! I/O helpers for pages, reports and debug overlays.
//!
//! - `load_page_json`: read a decoded page dumped as JSON.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `save_overlay_png`: rasterize page strokes and segment outlines.
use crate::error::IoError;
use crate::transform::{self, apply_transform_points, page_to_local};
use crate::types::{Page, PathKind, Point, Rect, Segment};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as PixelRect;
use nalgebra::Matrix3;
use serde::Serialize;
use std::fs;
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const OUTLINE: Rgb<u8> = Rgb([220, 30, 30]);
/// Flattening steps per cubic curve when drawing.
const CURVE_STEPS: usize = 12;

/// Load a page from a JSON file.
pub fn load_page_json(path: &Path) -> Result<Page, IoError> {
    let data = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| IoError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Draw the page strokes in their own colour and every segment rect as a red
/// outline, at `scale` pixels per page unit.
pub fn save_overlay_png(
    page: &Page,
    segments: &[Segment],
    scale: f32,
    path: &Path,
) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let img = render_overlay(page, segments, scale);
    img.save(path).map_err(|source| IoError::Image {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn render_overlay(page: &Page, segments: &[Segment], scale: f32) -> RgbImage {
    let b = page.bounds;
    let w = (b.width() * scale).ceil().max(1.0) as u32;
    let h = (b.height() * scale).ceil().max(1.0) as u32;
    let mut img = RgbImage::from_pixel(w, h, BACKGROUND);
    let m = transform::scale(scale) * page_to_local(&b);

    for path in page.paths.iter().filter(|p| p.kind == PathKind::Stroke) {
        let c = path.color;
        let color = Rgb([to_u8(c.r), to_u8(c.g), to_u8(c.b)]);
        for seg in &path.segments {
            let Some(pts) = apply_transform_points(&m, &flatten(&seg.points())) else {
                continue;
            };
            for pair in pts.windows(2) {
                let (p, q) = (pair[0], pair[1]);
                draw_line_segment_mut(&mut img, (p.x, p.y), (q.x, q.y), color);
            }
        }
    }
    for seg in segments {
        if let Some(rect) = pixel_rect(&m, &seg.rect) {
            draw_hollow_rect_mut(&mut img, rect, OUTLINE);
        }
    }
    img
}

/// Pixel rectangle covering `rect` after `m`; at least one pixel on each side.
fn pixel_rect(m: &Matrix3<f32>, rect: &Rect) -> Option<PixelRect> {
    let corners = [Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1)];
    let px = apply_transform_points(m, &corners)?;
    let (x0, y0) = (px[0].x.floor(), px[0].y.floor());
    let w = (px[1].x - px[0].x).round().max(1.0);
    let h = (px[1].y - px[0].y).round().max(1.0);
    Some(PixelRect::at(x0 as i32, y0 as i32).of_size(w as u32, h as u32))
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).clamp(0.0, 255.0) as u8
}

/// Polyline approximation of a line (2 points) or cubic curve (4 points).
fn flatten(points: &[Point]) -> Vec<Point> {
    match *points {
        [p0, c1, c2, p3] => (0..=CURVE_STEPS)
            .map(|i| {
                let t = i as f32 / CURVE_STEPS as f32;
                let u = 1.0 - t;
                let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
                Point::new(
                    a * p0.x + b * c1.x + c * c2.x + d * p3.x,
                    a * p0.y + b * c1.y + c * c2.y + d * p3.y,
                )
            })
            .collect(),
        _ => points.to_vec(),
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| IoError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
