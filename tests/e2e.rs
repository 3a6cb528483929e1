mod common;

use common::synthetic_image::{flat_u8, horizon_step_u8, line_mask};
use composition_coach::analysis::{AnalyzerParams, CompositionAnalyzer};
use composition_coach::analyzers::LeadingOptions;
use composition_coach::coach::{suggest, SuggestionRule};
use composition_coach::image::{ImageF32, ImageU8};
use composition_coach::scoring::compute_rule_scores;

fn seeded(seed: u64) -> CompositionAnalyzer {
    CompositionAnalyzer::new(AnalyzerParams {
        leading: LeadingOptions {
            seed: Some(seed),
            ..LeadingOptions::default()
        },
        ..AnalyzerParams::default()
    })
}

fn view(buffer: &[u8], w: usize, h: usize) -> ImageU8<'_> {
    ImageU8 {
        w,
        h,
        stride: w,
        data: buffer,
    }
}

#[test]
fn flat_image_yields_sentinels_and_no_suggestions() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (320usize, 240usize);
    let buffer = flat_u8(w, h, 128);

    let report = seeded(1)
        .analyze_gray(view(&buffer, w, h))
        .expect("flat image is valid input");
    let b = &report.bundle;

    assert_eq!(b.subject.confidence, 0.0);
    assert_eq!(b.horizon.confidence, 0.0);
    assert_eq!(b.leading.convergence, 0.0);
    assert!(b.leading.vanishing_point.is_none());
    assert_eq!(b.symmetry.score, 0.0);
    assert_eq!(b.diagonal.score, 0.0);
    assert_eq!(b.spiral.score, 0.0);
    assert_eq!(b.thirds.overall, 0.0);
    assert!(suggest(b).is_empty());

    let scores = compute_rule_scores(b);
    assert!(scores.iter().all(|s| s.score == 0), "scores {scores:?}");
}

#[test]
fn horizon_on_upper_third_is_recognised() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (320usize, 240usize);
    let buffer = horizon_step_u8(w, h, 80);

    let report = seeded(2)
        .analyze_gray(view(&buffer, w, h))
        .expect("valid input");
    let b = &report.bundle;

    assert!((b.horizon.y - 0.33).abs() < 0.02, "horizon y {}", b.horizon.y);
    assert!(b.horizon.confidence > 0.3, "confidence {}", b.horizon.confidence);
    assert!(
        b.thirds.horizon_score > 0.95,
        "horizon score {}",
        b.thirds.horizon_score
    );
    assert_eq!(b.scale, 1.0);
    assert!(b.leading.vanishing_point.is_none());

    let suggestions = suggest(b);
    assert!(
        suggestions.iter().all(|s| s.rule != SuggestionRule::Horizon),
        "unexpected horizon nudge: {suggestions:?}"
    );
    assert!(report.timings.total_ms >= 0.0);
    assert!(report.timings.stages.iter().any(|s| s.label == "edges"));
}

#[test]
fn scoring_and_coaching_are_reproducible() {
    let (w, h) = (400usize, 300usize);
    let buffer = horizon_step_u8(w, h, 200);
    let analyzer = seeded(3);

    let a = analyzer.analyze_gray(view(&buffer, w, h)).expect("valid input");
    let b = analyzer.analyze_gray(view(&buffer, w, h)).expect("valid input");
    assert_eq!(a.bundle, b.bundle);

    let first = serde_json::to_string(&(compute_rule_scores(&a.bundle), suggest(&a.bundle)))
        .expect("serialize");
    let second = serde_json::to_string(&(compute_rule_scores(&a.bundle), suggest(&a.bundle)))
        .expect("serialize");
    assert_eq!(first, second);
    assert!(suggest(&a.bundle).len() <= 3);
}

#[test]
fn converging_lines_produce_vanishing_point() {
    let (w, h) = (320usize, 240usize);
    let edges = line_mask(
        w,
        h,
        &[[40.0, 230.0, 160.0, 40.0], [280.0, 230.0, 160.0, 40.0]],
    );
    let gray = ImageF32::new(w, h);

    let report = seeded(4)
        .analyze_features(&gray, &edges, 1.0)
        .expect("matching sizes");
    let leading = &report.bundle.leading;
    let vp = leading.vanishing_point.expect("lines intersect");

    assert!(leading.convergence > 0.99, "convergence {}", leading.convergence);
    assert!(
        (vp.x - 160.0).abs() < 5.0 && (vp.y - 40.0).abs() < 5.0,
        "vp {vp:?}"
    );
    assert!(!leading.kept_segments.is_empty());
    for pair in leading.kept_segments.windows(2) {
        assert!(pair[0].length() >= pair[1].length());
    }

    let vp_norm = report.bundle.vanishing_point_normalized().expect("vp");
    assert!((vp_norm.x - 0.5).abs() < 0.02);

    let suggestions = suggest(&report.bundle);
    assert!(suggestions.iter().any(|s| s.rule == SuggestionRule::Leading));
}

#[test]
fn downscaled_results_map_back_to_original() {
    let (w, h) = (1280usize, 480usize);
    let buffer = horizon_step_u8(w, h, 160);

    let report = seeded(5)
        .analyze_gray(view(&buffer, w, h))
        .expect("valid input");
    let b = &report.bundle;
    assert!((b.scale - 0.5).abs() < 1e-6);
    assert_eq!((b.frame.width, b.frame.height), (640, 240));
    assert!((b.horizon.y - 1.0 / 3.0).abs() < 0.02, "horizon y {}", b.horizon.y);
}
