use composition_coach::analysis::{AnalyzerParams, CompositionAnalyzer};
use composition_coach::config::edge_lines::load_config;
use composition_coach::image::io::{load_image, save_edge_map, write_json_file};
use composition_coach::primitives::VisionPrimitives;
use composition_coach::types::LineSegment;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let image = load_image(&config.input)?;
    let analyzer = CompositionAnalyzer::new(AnalyzerParams {
        preprocess: config.preprocess,
        hough: config.hough,
        ..AnalyzerParams::default()
    });
    let prims = analyzer.primitives();
    let gray = prims.grayscale(&image).map_err(|e| e.to_string())?;
    let features = analyzer
        .extract_features(gray.as_view())
        .map_err(|e| e.to_string())?;
    let segments = prims
        .detect_lines(&features.edges, &config.hough)
        .map_err(|e| e.to_string())?;

    let summary = EdgeLinesSummary {
        width: features.edges.width(),
        height: features.edges.height(),
        scale: features.scale,
        edge_pixels: features.edges.count_nonzero(),
        segment_count: segments.len(),
        segments,
    };

    save_edge_map(&features.edges, &config.output.edges_png)?;
    write_json_file(&config.output.segments_json, &summary)?;

    println!(
        "Saved {}x{} edge map to {}",
        summary.width,
        summary.height,
        config.output.edges_png.display()
    );
    println!(
        "Saved {} segments to {}",
        summary.segment_count,
        config.output.segments_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: edge_lines <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EdgeLinesSummary {
    width: usize,
    height: usize,
    scale: f32,
    edge_pixels: usize,
    segment_count: usize,
    segments: Vec<LineSegment>,
}
