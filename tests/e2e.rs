mod common;

use common::synthetic_page::{
    label_run, twelve_lead_page, unlabeled_page, PAGE_H, PAGE_W, RHYTHM_ANCHOR,
};
use lead_layout::diagnostics::{Fallback, Stage};
use lead_layout::grid::{AxisSource, RhythmSource};
use lead_layout::segmenter::StrategyKind;
use lead_layout::types::{Channel, Page, Point};
use lead_layout::{LayoutSegmenter, SegmentError, SegmenterParams, StrategyMode};
use std::collections::HashSet;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn labeled_page_yields_full_grid() {
    init_logger();
    let page = twelve_lead_page();
    let report = LayoutSegmenter::default().segment(&page).unwrap();

    assert_eq!(report.strategy, StrategyKind::LabelGrid);
    assert_eq!(report.segments.len(), 13);
    let names: Vec<Channel> = report.segments.iter().map(|s| s.name).collect();
    assert_eq!(names, Channel::ALL.to_vec());

    let grid = report.trace.grid.as_ref().expect("grid stage recorded");
    assert_eq!(grid.columns.clusters_found, 3);
    assert_eq!(grid.columns.source, AxisSource::Labels);
    // Row clustering also sees the rhythm "II"; the excess cluster is truncated.
    assert_eq!(grid.rows.clusters_found, 5);
    assert_eq!(grid.rows.source, AxisSource::Labels);
    assert_eq!(grid.rhythm.source, RhythmSource::Label);
    assert_close(grid.rhythm.top, (700.0 + RHYTHM_ANCHOR.y) / 2.0);
    assert!(report.trace.fallbacks.is_empty());

    let rhythm = report.segment(Channel::Rhythm).unwrap();
    assert_close(rhythm.rect.y0, 800.0);
    assert_close(rhythm.rect.y1, PAGE_H);
    assert_close(rhythm.rect.width(), PAGE_W);

    let v6 = report.segment(Channel::V6).unwrap();
    assert_close(v6.rect.x0, 430.0);
    assert_close(v6.rect.y0, 600.0);
    assert_close(v6.rect.y1, 800.0);

    let area: f32 = report
        .segments
        .iter()
        .map(|s| s.rect.width() * s.rect.height())
        .sum();
    assert_close(area / (PAGE_W * PAGE_H), 1.0);
}

#[test]
fn unlabeled_page_groups_traces_by_previous_value() {
    init_logger();
    let page = unlabeled_page(&[10.0, 35.0, 90.0, 95.0, 300.0]);
    let params = SegmenterParams {
        strategy: StrategyMode::PathClusters,
        ..Default::default()
    };
    let report = LayoutSegmenter::new(params).segment(&page).unwrap();
    assert_eq!(report.strategy, StrategyKind::PathClusters);

    let groups = &report.trace.paths.as_ref().unwrap().groups;
    let ranges: Vec<(f32, f32, usize)> = groups
        .iter()
        .map(|g| (g.centroid_min, g.centroid_max, g.path_count))
        .collect();
    assert_eq!(
        ranges,
        vec![
            (10.0, 10.0, 1),
            (35.0, 35.0, 1),
            (90.0, 95.0, 2),
            (300.0, 300.0, 1)
        ]
    );
    let names: Vec<Channel> = report.segments.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![Channel::I, Channel::II, Channel::III, Channel::AVR]
    );
    let owned = report.segments[2].paths.as_ref().unwrap();
    assert_eq!(owned.len(), 2);
}

#[test]
fn few_labels_fall_back_to_path_clusters() {
    init_logger();
    let mut page = unlabeled_page(&[150.0, 400.0, 650.0]);
    page.text_runs = vec![
        label_run("I", Point::new(30.0, 100.0)),
        label_run("aVR", Point::new(297.0, 100.0)),
        label_run("V1", Point::new(563.0, 100.0)),
    ];
    let report = LayoutSegmenter::default().segment(&page).unwrap();

    assert_eq!(report.strategy, StrategyKind::PathClusters);
    assert_eq!(
        report.trace.fallbacks,
        vec![Fallback::InsufficientLabels {
            found: 3,
            required: 6
        }]
    );
    assert!(report.trace.log.iter().any(|l| l.contains("fallback")));
    assert_eq!(report.segments.len(), 3);
}

#[test]
fn blank_page_yields_empty_result() {
    init_logger();
    let page = Page::new(PAGE_W, PAGE_H);
    let report = LayoutSegmenter::default().segment(&page).unwrap();
    assert!(report.is_empty());
    assert!(report
        .trace
        .log
        .iter()
        .any(|l| l.contains("no segments produced")));
}

#[test]
fn invalid_page_is_an_error_not_an_empty_result() {
    let segmenter = LayoutSegmenter::default();
    let err = segmenter.segment(&Page::new(0.0, 500.0)).unwrap_err();
    assert_eq!(
        err,
        SegmentError::InvalidPage {
            width: 0.0,
            height: 500.0
        }
    );
    assert!(segmenter.segment(&Page::new(f32::NAN, 500.0)).is_err());
}

#[test]
fn ii_label_below_page_keeps_rhythm_strip() {
    init_logger();
    let mut page = twelve_lead_page();
    page.text_runs.push(label_run("II", Point::new(30.0, 5000.0)));
    let report = LayoutSegmenter::default().segment(&page).unwrap();

    assert_eq!(report.strategy, StrategyKind::LabelGrid);
    assert_eq!(report.segments.len(), 13);
    assert!(report.trace.dropped.is_empty());
    assert!(matches!(
        report.trace.fallbacks.as_slice(),
        [Fallback::RhythmLabelRejected { .. }]
    ));
    let rhythm = report.segment(Channel::Rhythm).unwrap();
    assert_close(rhythm.rect.y0, PAGE_H * 5.0 / 6.0);
    assert_close(rhythm.rect.y1, PAGE_H);
}

#[test]
fn segmentation_is_idempotent() {
    let page = twelve_lead_page();
    let segmenter = LayoutSegmenter::default();
    let first = serde_json::to_string(&segmenter.segment(&page).unwrap().rects()).unwrap();
    let second = serde_json::to_string(&segmenter.segment(&page).unwrap().rects()).unwrap();
    assert_eq!(first, second);

    let mut reversed = page.clone();
    reversed.text_runs.reverse();
    reversed.paths.reverse();
    let third = serde_json::to_string(&segmenter.segment(&reversed).unwrap().rects()).unwrap();
    assert_eq!(first, third);
}

#[test]
fn every_strategy_emits_unique_non_degenerate_segments() {
    let mut page = twelve_lead_page();
    page.paths
        .extend(unlabeled_page(&[20.0, 60.0, 250.0, 520.0, 880.0]).paths);
    for strategy in [
        StrategyMode::Auto,
        StrategyMode::LabelGrid,
        StrategyMode::PathClusters,
        StrategyMode::Uniform,
    ] {
        let params = SegmenterParams {
            strategy,
            ..Default::default()
        };
        let report = LayoutSegmenter::new(params).segment(&page).unwrap();
        assert!(!report.is_empty(), "{strategy:?} produced nothing");
        let mut seen = HashSet::new();
        for seg in &report.segments {
            assert!(seen.insert(seg.name), "{strategy:?} repeated {}", seg.name);
            assert!(!seg.rect.is_degenerate(), "{strategy:?} emitted {seg:?}");
        }
    }
}

#[test]
fn trace_records_stage_timings_and_strategy_line() {
    let report = LayoutSegmenter::default()
        .segment(&twelve_lead_page())
        .unwrap();
    let timings = &report.trace.timings;
    assert!(timings.get(Stage::Labels).is_some());
    assert!(timings.get(Stage::Grid).is_some());
    assert!(timings.get(Stage::Build).is_some());
    assert!(timings.get(Stage::PathFilter).is_none());
    assert!(timings.total_ms >= 0.0);
    let paths = format!("labels=13, paths={}", report.trace.input.paths);
    assert!(report
        .trace
        .log
        .iter()
        .any(|l| l.starts_with("strategy: label-grid") && l.contains(&paths)));
    assert_eq!(report.trace.labels.as_ref().unwrap().tokens.len(), 13);
}
