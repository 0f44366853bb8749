use lead_layout::config::{load_config, RuntimeConfig};
use lead_layout::io::{load_page_json, save_overlay_png, write_json_file};
use lead_layout::types::Page;
use lead_layout::{
    materialize_all, IoError, LayoutSegmenter, RedrawMaterializer, SegmentationReport,
};
use std::env;
use std::path::Path;

const DEFAULT_OVERLAY_SCALE: f32 = 1.0;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    let page = load_page_json(&config.input_path).map_err(|e| e.to_string())?;

    let segmenter = LayoutSegmenter::new(config.params.clone());
    let report = segmenter.segment(&page).map_err(|e| e.to_string())?;

    let format = config.output.format;
    if format.includes_text() {
        print_text_summary(&report);
    }
    if format.includes_json() {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        println!("{json}");
    }

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        println!("Saved report to {}", path.display());
    }
    if config.output.debug_dir.is_some() {
        save_debug_artifacts(&config, &page, &report).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn usage() -> String {
    "Usage: lead_layout <config.json>".to_string()
}

fn print_text_summary(report: &SegmentationReport) {
    let trace = &report.trace;
    println!(
        "Page {:.1}x{:.1}: {} paths, {} text runs",
        trace.input.page.width(),
        trace.input.page.height(),
        trace.input.paths,
        trace.input.text_runs
    );
    println!(
        "Strategy: {} ({} segments, {:.3} ms)",
        report.strategy.as_str(),
        report.segments.len(),
        trace.timings.total_ms
    );
    for seg in &report.segments {
        let r = seg.rect;
        let owned = seg
            .paths
            .as_ref()
            .map(|p| format!(" paths={}", p.len()))
            .unwrap_or_default();
        println!(
            "  {:<6} [{:.1}, {:.1}] - [{:.1}, {:.1}]{owned}",
            seg.name.as_str(),
            r.x0,
            r.y0,
            r.x1,
            r.y1
        );
    }
    for fallback in &trace.fallbacks {
        println!("  {fallback}");
    }
    for dropped in &trace.dropped {
        println!("  {dropped}");
    }
    for timing in &trace.timings.stages {
        println!("  {:?}: {:.3} ms", timing.stage, timing.elapsed_ms);
    }
}

fn save_debug_artifacts(
    config: &RuntimeConfig,
    page: &Page,
    report: &SegmentationReport,
) -> Result<(), IoError> {
    let Some(dir) = &config.output.debug_dir else {
        return Ok(());
    };
    write_json_file(&dir.join("report.json"), report)?;

    let scale = config
        .output
        .overlay_scale
        .unwrap_or(DEFAULT_OVERLAY_SCALE);
    save_overlay_png(page, &report.segments, scale, &dir.join("overlay.png"))?;

    let drawings = materialize_all(&RedrawMaterializer, page, &report.segments);
    for drawing in &drawings {
        write_json_file(&dir.join(format!("{}.json", drawing.name.as_str())), drawing)?;
    }
    println!(
        "Saved debug artifacts ({} segment drawings) to {}",
        drawings.len(),
        dir.display()
    );
    Ok(())
}
