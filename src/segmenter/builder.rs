//! Conversion of grid cells or path groups into named segments.
//!
//! Grid cells map one-to-one onto channel names and are used as-is. Path
//! groups take the next unused name in channel order; a group without usable
//! geometry is dropped before it can consume a name, and groups beyond the
//! 13th are discarded.

use crate::diagnostics::{DropReason, DroppedGroup, PipelineTrace};
use crate::grid::GridCells;
use crate::paths::PathGroup;
use crate::types::{Channel, Rect, Segment};

/// One segment per grid cell plus the rhythm strip, without padding.
pub fn segments_from_grid(cells: &GridCells, trace: &mut PipelineTrace) -> Vec<Segment> {
    let mut out = Vec::with_capacity(Channel::ALL.len());
    for (index, (name, rect)) in cells.named().into_iter().enumerate() {
        if rect.is_degenerate() {
            trace.drop_group(DroppedGroup {
                index,
                channel: Some(name),
                reason: DropReason::Degenerate,
                path_count: 0,
            });
            continue;
        }
        out.push(Segment {
            name,
            rect,
            paths: None,
        });
    }
    out
}

/// One padded segment per path group, named in channel order.
///
/// Padded rectangles are clamped to `page`. Owned paths travel with the
/// segment for redraw-style materialization.
pub fn segments_from_groups(
    groups: Vec<PathGroup>,
    page: &Rect,
    padding: f32,
    trace: &mut PipelineTrace,
) -> Vec<Segment> {
    let mut names = Channel::ALL.iter().copied();
    let mut out = Vec::new();
    for (index, group) in groups.into_iter().enumerate() {
        let path_count = group.paths.len();
        let degenerate = DroppedGroup {
            index,
            channel: None,
            reason: DropReason::Degenerate,
            path_count,
        };
        let Some(bounds) = group.bounds().filter(|b| !b.is_degenerate()) else {
            trace.drop_group(degenerate);
            continue;
        };
        let Some(rect) = bounds.expand(padding).intersect(page) else {
            trace.drop_group(degenerate);
            continue;
        };
        let Some(name) = names.next() else {
            trace.drop_group(DroppedGroup {
                reason: DropReason::NamesExhausted,
                ..degenerate
            });
            continue;
        };
        out.push(Segment {
            name,
            rect,
            paths: Some(group.paths),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::InputDescriptor;
    use crate::types::{Point, StrokeColor, VectorPath};

    fn trace() -> PipelineTrace {
        PipelineTrace::new(InputDescriptor {
            page: Rect::new(0.0, 0.0, 800.0, 1000.0),
            paths: 0,
            text_runs: 0,
        })
    }

    fn group(points: &[Point]) -> PathGroup {
        let path = VectorPath::polyline(points, StrokeColor::BLACK);
        let centroid = path.vertical_centroid().unwrap_or(0.0);
        PathGroup {
            paths: vec![path],
            centroids: vec![centroid],
        }
    }

    fn wave(y: f32) -> PathGroup {
        group(&[
            Point::new(100.0, y),
            Point::new(200.0, y - 10.0),
            Point::new(300.0, y + 5.0),
        ])
    }

    #[test]
    fn degenerate_groups_do_not_consume_names() {
        let page = Rect::new(0.0, 0.0, 800.0, 1000.0);
        let flat = group(&[Point::new(100.0, 200.0), Point::new(400.0, 200.0)]);
        let groups = vec![wave(50.0), flat, wave(300.0)];
        let mut trace = trace();
        let segments = segments_from_groups(groups, &page, 10.0, &mut trace);

        let names: Vec<Channel> = segments.iter().map(|s| s.name).collect();
        assert_eq!(names, vec![Channel::I, Channel::II]);
        assert_eq!(segments[0].rect, Rect::new(90.0, 30.0, 310.0, 65.0));
        assert_eq!(trace.dropped.len(), 1);
        assert_eq!(trace.dropped[0].reason, DropReason::Degenerate);
        assert_eq!(trace.dropped[0].index, 1);
    }

    #[test]
    fn groups_beyond_thirteen_are_discarded() {
        let page = Rect::new(0.0, 0.0, 800.0, 1000.0);
        let groups: Vec<PathGroup> = (0..15).map(|i| wave(30.0 + 60.0 * i as f32)).collect();
        let mut trace = trace();
        let segments = segments_from_groups(groups, &page, 10.0, &mut trace);
        assert_eq!(segments.len(), 13);
        assert_eq!(segments[12].name, Channel::Rhythm);
        let exhausted = trace
            .dropped
            .iter()
            .filter(|d| d.reason == DropReason::NamesExhausted)
            .count();
        assert_eq!(exhausted, 2);
        assert!(segments.iter().all(|s| s.paths.as_ref().map(Vec::len) == Some(1)));
    }

    #[test]
    fn padding_is_clamped_to_page() {
        let page = Rect::new(0.0, 0.0, 800.0, 1000.0);
        let mut trace = trace();
        let segments = segments_from_groups(vec![wave(5.0)], &page, 15.0, &mut trace);
        assert_eq!(segments[0].rect.y0, 0.0);
        assert_eq!(segments[0].rect.x0, 85.0);
    }

    #[test]
    fn grid_cells_map_to_all_names() {
        let page = Rect::new(0.0, 0.0, 600.0, 1200.0);
        let cells = GridCells::uniform(&page, 1000.0);
        let mut trace = trace();
        let segments = segments_from_grid(&cells, &mut trace);
        assert_eq!(segments.len(), 13);
        assert!(segments.iter().all(|s| s.paths.is_none()));
        assert_eq!(segments[3].name, Channel::AVR);
        assert_eq!(segments[3].rect, cells.cell(1, 0));
    }
}
