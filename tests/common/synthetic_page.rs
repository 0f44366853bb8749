use lead_layout::types::{Channel, Page, Point, Rect, StrokeColor, TextRun, VectorPath};

pub const PAGE_W: f32 = 800.0;
pub const PAGE_H: f32 = 1000.0;

/// Label x anchors of the three grid columns.
pub const LABEL_XS: [f32; 3] = [30.0, 297.0, 563.0];
/// Label y anchors of the four grid rows.
pub const LABEL_YS: [f32; 4] = [100.0, 300.0, 500.0, 700.0];
/// Anchor of the rhythm-strip "II" label.
pub const RHYTHM_ANCHOR: Point = Point { x: 30.0, y: 900.0 };

/// Text run of `text` centered on `anchor`.
pub fn label_run(text: &str, anchor: Point) -> TextRun {
    TextRun::new(
        text,
        Rect::new(anchor.x - 8.0, anchor.y - 5.0, anchor.x + 8.0, anchor.y + 5.0),
    )
}

/// The 12 grid labels at their canonical anchors.
pub fn grid_label_runs() -> Vec<TextRun> {
    let mut runs = Vec::new();
    for (r, row) in Channel::GRID.iter().enumerate() {
        for (c, ch) in row.iter().enumerate() {
            runs.push(label_run(ch.as_str(), Point::new(LABEL_XS[c], LABEL_YS[r])));
        }
    }
    runs
}

/// Dark zig-zag stroke spanning `x0..x1` around `y` with amplitude `amp`.
pub fn trace_path(x0: f32, x1: f32, y: f32, amp: f32) -> VectorPath {
    let steps = 20;
    let pts: Vec<Point> = (0..=steps)
        .map(|i| {
            let x = x0 + (x1 - x0) * i as f32 / steps as f32;
            let dy = if i % 2 == 0 { -amp } else { amp };
            Point::new(x, y + dy)
        })
        .collect();
    VectorPath::polyline(&pts, StrokeColor::new(0.1, 0.1, 0.1))
}

/// Light gridline that the colour and shape predicates both reject.
pub fn gridline(x: f32) -> VectorPath {
    VectorPath::polyline(
        &[Point::new(x, 0.0), Point::new(x, PAGE_H)],
        StrokeColor::new(0.9, 0.7, 0.7),
    )
}

/// Canonical 12-lead page: 12 grid labels, a bottom "II", one trace per cell
/// row and a full-width rhythm trace.
pub fn twelve_lead_page() -> Page {
    let mut page = Page::new(PAGE_W, PAGE_H);
    page.text_runs = grid_label_runs();
    page.text_runs.push(label_run("II", RHYTHM_ANCHOR));
    page.text_runs.push(TextRun::new("25 mm/s 10 mm/mV", Rect::new(600.0, 980.0, 780.0, 995.0)));
    for &y in &LABEL_YS {
        page.paths.push(trace_path(20.0, 780.0, y + 40.0, 15.0));
    }
    page.paths.push(trace_path(20.0, 780.0, 930.0, 15.0));
    for i in 0..8 {
        page.paths.push(gridline(i as f32 * 100.0 + 50.0));
    }
    page
}

/// Label-free page with traces centered at `ys`.
pub fn unlabeled_page(ys: &[f32]) -> Page {
    let mut page = Page::new(PAGE_W, PAGE_H);
    page.paths = ys.iter().map(|&y| trace_path(40.0, 760.0, y, 4.0)).collect();
    page
}
