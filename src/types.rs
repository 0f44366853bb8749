//! Page primitives and result types shared by every stage.
//!
//! Coordinates are page units with the origin in the top-left corner and `y`
//! growing downward, which is how the upstream decoder reports them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D point in page space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned box with `x0 <= x1` and `y0 <= y1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Build a rect from two corners in any order.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Tight bounds of a point set. `None` when no finite point is supplied.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut acc: Option<Rect> = None;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            acc = Some(match acc {
                None => Rect {
                    x0: p.x,
                    y0: p.y,
                    x1: p.x,
                    y1: p.y,
                },
                Some(r) => Rect {
                    x0: r.x0.min(p.x),
                    y0: r.y0.min(p.y),
                    x1: r.x1.max(p.x),
                    y1: r.y1.max(p.y),
                },
            });
        }
        acc
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5)
    }

    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// Zero (or negative) extent along either axis.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Grow symmetrically by `pad` on every side.
    pub fn expand(&self, pad: f32) -> Rect {
        Rect {
            x0: self.x0 - pad,
            y0: self.y0 - pad,
            x1: self.x1 + pad,
            y1: self.y1 + pad,
        }
    }

    /// Overlap of two rects; `None` when they do not share any area.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (!r.is_degenerate()).then_some(r)
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.y0 && p.y < self.y1
    }
}

/// Single drawing primitive of a [`VectorPath`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VectorSegment {
    Line { p0: Point, p1: Point },
    Curve { p0: Point, c1: Point, c2: Point, p3: Point },
}

impl VectorSegment {
    /// Every defining point, control points included.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            VectorSegment::Line { p0, p1 } => vec![p0, p1],
            VectorSegment::Curve { p0, c1, c2, p3 } => vec![p0, c1, c2, p3],
        }
    }

    /// Start and end points of the primitive.
    pub fn endpoints(&self) -> [Point; 2] {
        match *self {
            VectorSegment::Line { p0, p1 } => [p0, p1],
            VectorSegment::Curve { p0, p3, .. } => [p0, p3],
        }
    }

    /// Apply `f` to every defining point.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> VectorSegment {
        match *self {
            VectorSegment::Line { p0, p1 } => VectorSegment::Line {
                p0: f(p0),
                p1: f(p1),
            },
            VectorSegment::Curve { p0, c1, c2, p3 } => VectorSegment::Curve {
                p0: f(p0),
                c1: f(c1),
                c2: f(c2),
                p3: f(p3),
            },
        }
    }
}

/// Stroke colour with channel intensities in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl StrokeColor {
    pub const BLACK: StrokeColor = StrokeColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Sum of the three intensities on a 0–3 scale; lower is darker.
    pub fn darkness_sum(&self) -> f32 {
        self.r + self.g + self.b
    }
}

/// Paint operation a path was drawn with. Only strokes can carry a trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathKind {
    #[default]
    Stroke,
    Fill,
    FillStroke,
    Other,
}

/// Ordered primitives sharing one stroke colour and paint kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorPath {
    pub segments: Vec<VectorSegment>,
    pub color: StrokeColor,
    pub kind: PathKind,
    /// Bounds of every defining point; `None` for a path without finite points.
    pub bounds: Option<Rect>,
}

impl VectorPath {
    pub fn new(segments: Vec<VectorSegment>, color: StrokeColor, kind: PathKind) -> Self {
        let bounds = Rect::from_points(segments.iter().flat_map(|s| s.points()));
        Self {
            segments,
            color,
            kind,
            bounds,
        }
    }

    /// Stroked polyline through `points`.
    pub fn polyline(points: &[Point], color: StrokeColor) -> Self {
        let segments = points
            .windows(2)
            .map(|w| VectorSegment::Line { p0: w[0], p1: w[1] })
            .collect();
        Self::new(segments, color, PathKind::Stroke)
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| s.points())
    }

    /// Mean `y` over the endpoints of every primitive.
    pub fn vertical_centroid(&self) -> Option<f32> {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for seg in &self.segments {
            for p in seg.endpoints() {
                if p.y.is_finite() {
                    sum += p.y as f64;
                    count += 1;
                }
            }
        }
        (count > 0).then(|| (sum / count as f64) as f32)
    }
}

// Bounds are derived, so deserialisation goes through `VectorPath::new`.
impl<'de> Deserialize<'de> for VectorPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawPath {
            segments: Vec<VectorSegment>,
            #[serde(default)]
            color: StrokeColor,
            #[serde(default)]
            kind: PathKind,
        }
        let raw = RawPath::deserialize(deserializer)?;
        Ok(VectorPath::new(raw.segments, raw.color, raw.kind))
    }
}

/// Text run reported by the decoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub bounds: Rect,
}

impl TextRun {
    pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }
}

/// Decoded first page: dimensions, vector paths and text layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub bounds: Rect,
    #[serde(default)]
    pub paths: Vec<VectorPath>,
    #[serde(default)]
    pub text_runs: Vec<TextRun>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            paths: Vec::new(),
            text_runs: Vec::new(),
        }
    }
}

/// One of the 13 fixed channel slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    I,
    II,
    III,
    #[serde(rename = "aVR")]
    AVR,
    #[serde(rename = "aVL")]
    AVL,
    #[serde(rename = "aVF")]
    AVF,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    #[serde(rename = "RHYTHM")]
    Rhythm,
}

impl Channel {
    /// All names in assignment order.
    pub const ALL: [Channel; 13] = [
        Channel::I,
        Channel::II,
        Channel::III,
        Channel::AVR,
        Channel::AVL,
        Channel::AVF,
        Channel::V1,
        Channel::V2,
        Channel::V3,
        Channel::V4,
        Channel::V5,
        Channel::V6,
        Channel::Rhythm,
    ];

    /// The 4×3 grid in row-major order.
    pub const GRID: [[Channel; 3]; 4] = [
        [Channel::I, Channel::II, Channel::III],
        [Channel::AVR, Channel::AVL, Channel::AVF],
        [Channel::V1, Channel::V2, Channel::V3],
        [Channel::V4, Channel::V5, Channel::V6],
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::I => "I",
            Channel::II => "II",
            Channel::III => "III",
            Channel::AVR => "aVR",
            Channel::AVL => "aVL",
            Channel::AVF => "aVF",
            Channel::V1 => "V1",
            Channel::V2 => "V2",
            Channel::V3 => "V3",
            Channel::V4 => "V4",
            Channel::V5 => "V5",
            Channel::V6 => "V6",
            Channel::Rhythm => "RHYTHM",
        }
    }

    /// Exact, case-sensitive lookup of a whole token.
    pub fn from_label(text: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.as_str() == text)
    }

    /// Position in [`Channel::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// `(row, col)` inside the grid; `None` for the rhythm strip.
    pub fn grid_position(&self) -> Option<(usize, usize)> {
        let idx = self.index();
        (idx < 12).then(|| (idx / 3, idx % 3))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel-name token found in the text layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelToken {
    pub text: String,
    pub channel: Channel,
    /// Center of the run's bounding box.
    pub anchor: Point,
    pub bounds: Rect,
}

/// Final output unit handed to the materializer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub name: Channel,
    pub rect: Rect,
    /// Paths owned by the segment; set only by the path-clustering strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<VectorPath>>,
}
