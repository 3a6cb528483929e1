use composition_coach::analysis::CompositionAnalyzer;
use composition_coach::coach::{suggest, Suggestion};
use composition_coach::config::analyze::load_config;
use composition_coach::diagnostics::TimingBreakdown;
use composition_coach::image::io::{load_image, save_edge_map, write_json_file};
use composition_coach::scoring::{compute_rule_scores, top_matches, RuleScore};
use composition_coach::types::{AnalysisBundle, LeadingResult};
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

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

    let load_start = Instant::now();
    let image = load_image(&config.input)?;
    let load_ms = load_start.elapsed().as_secs_f64() * 1000.0;

    let analyzer = CompositionAnalyzer::new(config.params.clone());
    let (mut report, features) = analyzer
        .analyze_image_with_features(&image)
        .map_err(|e| format!("Analysis of {} failed: {e}", config.input.display()))?;
    report.timings.push("load", load_ms);

    let scores = compute_rule_scores(&report.bundle);
    let top = top_matches(&scores, config.top.min_score, config.top.max);
    let suggestions = suggest(&report.bundle);

    if let Some(edges_png) = &config.output.edges_png {
        save_edge_map(&features.edges, edges_png)?;
    }

    let output = CoachReport {
        input: config.input.display().to_string(),
        bundle: &report.bundle,
        segment_count: report.segment_count,
        leading_original: report.bundle.leading.to_original(report.bundle.scale),
        scores: &scores,
        top: &top,
        suggestions: &suggestions,
        timings: &report.timings,
    };
    write_json_file(&config.output.report_json, &output)?;

    for s in &top {
        println!("{:>3}  {}  ({})", s.score, s.label, s.reason);
    }
    for s in &suggestions {
        println!("-> {} [priority {:.1}]", s.message, s.priority);
    }
    println!(
        "Saved report to {} ({:.1} ms)",
        config.output.report_json.display(),
        report.timings.total_ms
    );
    Ok(())
}

fn usage() -> String {
    "Usage: composition-coach <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CoachReport<'a> {
    input: String,
    bundle: &'a AnalysisBundle,
    segment_count: usize,
    /// Leading lines in full-resolution pixels, for overlays on the input.
    leading_original: LeadingResult,
    scores: &'a [RuleScore],
    top: &'a [RuleScore],
    suggestions: &'a [Suggestion],
    timings: &'a TimingBreakdown,
}
