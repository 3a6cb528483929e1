//! Actionable camera nudges.
//!
//! Works from the raw analyzer outputs rather than the rounded display
//! scores of [`crate::scoring`], because nudge magnitudes need the
//! continuous values. Each rule contributes at most one [`Suggestion`];
//! the result is ranked by `priority = gain / max(1, effort)` and cut to
//! the best [`MAX_SUGGESTIONS`].
//!
//! Sign conventions: pans are fractions of the frame (+x right, +y down)
//! and always point opposite to where the subject should move inside the
//! frame; rotations are degrees, clockwise positive. Pans are capped at
//! ±[`MAX_PAN`].
use crate::analyzers::THIRDS_TARGETS;
use crate::types::{AnalysisBundle, DiagonalDirection, SpiralOrientation};
use serde::{Deserialize, Serialize};

pub const MAX_SUGGESTIONS: usize = 3;
pub const MAX_PAN: f32 = 0.25;

/// Detector confidence required before the subject or horizon is coached.
const MIN_CONFIDENCE: f32 = 0.3;
const THIRDS_TOLERANCE: f32 = 0.01;
const HORIZON_TOLERANCE: f32 = 0.015;
const SYMMETRY_TOLERANCE: f32 = 0.015;
const SYMMETRY_MIN_SCORE: f32 = 0.4;
const DIAGONAL_MAX_SCORE: f32 = 0.85;
const DIAGONAL_ROTATION_DEG: f32 = 3.0;
const SPIRAL_EYE_DISTANCE: f32 = 0.03;
const SPIRAL_MIN_SCORE: f32 = 0.75;
const SPIRAL_ROTATION_DEG: f32 = 2.0;
/// Fixed tilt proposed for leading lines; the vanishing point itself is not
/// used to size it.
const LEADING_TILT: f32 = -0.04;
const LEADING_CONVERGENCE: f32 = 0.8;
/// Direction words are only emitted for displacements above this.
const PHRASE_THRESHOLD: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Nudge {
    Pan { dx: f32, dy: f32 },
    Rotate { degrees: f32 },
    #[serde(rename_all = "camelCase")]
    Zoom { delta_fraction: f32 },
}

impl Nudge {
    /// Pan with both components capped to ±[`MAX_PAN`].
    pub fn pan(dx: f32, dy: f32) -> Self {
        Self::Pan {
            dx: cap(dx),
            dy: cap(dy),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionRule {
    Thirds,
    Phi,
    Spiral,
    Leading,
    Diagonal,
    Symmetry,
    Horizon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub rule: SuggestionRule,
    pub message: String,
    pub nudges: Vec<Nudge>,
    /// Expected score improvement, `0..=100`.
    pub estimated_gain: f32,
    /// Rough cost of the adjustment; smaller is easier.
    pub effort: f32,
    pub priority: f32,
}

impl Suggestion {
    fn new(
        rule: SuggestionRule,
        message: String,
        nudges: Vec<Nudge>,
        estimated_gain: f32,
        effort: f32,
    ) -> Self {
        let estimated_gain = estimated_gain.clamp(0.0, 100.0);
        let effort = effort.max(0.0);
        Self {
            rule,
            message,
            nudges,
            estimated_gain,
            effort,
            priority: estimated_gain / effort.max(1.0),
        }
    }
}

/// Ranked suggestions for `bundle`, at most [`MAX_SUGGESTIONS`].
pub fn suggest(bundle: &AnalysisBundle) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = [
        suggest_thirds(bundle),
        suggest_horizon(bundle),
        suggest_diagonal(bundle),
        suggest_symmetry(bundle),
        suggest_spiral(bundle),
        suggest_leading(bundle),
    ]
    .into_iter()
    .flatten()
    .collect();

    out.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    out.truncate(MAX_SUGGESTIONS);
    out
}

fn suggest_thirds(bundle: &AnalysisBundle) -> Option<Suggestion> {
    let subject = &bundle.subject;
    if !(subject.confidence > MIN_CONFIDENCE) {
        return None;
    }
    let (target, dist) = THIRDS_TARGETS.nearest_point(&subject.center);
    let dx = target.x - subject.center.x;
    let dy = target.y - subject.center.y;
    if near(dx, THIRDS_TOLERANCE) && near(dy, THIRDS_TOLERANCE) {
        return None;
    }
    // Push halfway toward the target; the camera moves opposite the subject.
    let gain = (1.0 - (-(dist * dist) / 0.04).exp()) * 100.0;
    Some(Suggestion::new(
        SuggestionRule::Thirds,
        phrase_pan(dx, dy, "Place the subject on the nearest third"),
        vec![Nudge::pan(-dx * 0.5, -dy * 0.5)],
        gain,
        dx.hypot(dy) * 100.0,
    ))
}

fn suggest_horizon(bundle: &AnalysisBundle) -> Option<Suggestion> {
    let horizon = &bundle.horizon;
    if !(horizon.confidence > MIN_CONFIDENCE) {
        return None;
    }
    let (target, _) = THIRDS_TARGETS.nearest_line(horizon.y);
    let dy = target - horizon.y;
    if near(dy, HORIZON_TOLERANCE) {
        return None;
    }
    let upper = target < 0.5;
    let message = format!(
        "{} to bring the horizon to the {} third",
        if dy < 0.0 { "Tilt up" } else { "Tilt down" },
        if upper { "upper" } else { "lower" }
    );
    Some(Suggestion::new(
        SuggestionRule::Horizon,
        message,
        vec![Nudge::pan(0.0, -dy * 0.6)],
        (dy.abs() * 220.0).min(100.0),
        dy.abs() * 100.0,
    ))
}

fn suggest_diagonal(bundle: &AnalysisBundle) -> Option<Suggestion> {
    let d = &bundle.diagonal;
    if !(d.score > 0.0 && d.score < DIAGONAL_MAX_SCORE) {
        return None;
    }
    let degrees = match d.best {
        DiagonalDirection::TopLeftToBottomRight => -DIAGONAL_ROTATION_DEG,
        DiagonalDirection::TopRightToBottomLeft => DIAGONAL_ROTATION_DEG,
    };
    let message = format!(
        "Rotate {} ~{}° to align edges with the diagonals",
        if degrees > 0.0 {
            "clockwise"
        } else {
            "counter-clockwise"
        },
        degrees.abs()
    );
    Some(Suggestion::new(
        SuggestionRule::Diagonal,
        message,
        vec![Nudge::Rotate { degrees }],
        20.0 + (1.0 - d.score) * 50.0,
        degrees.abs(),
    ))
}

fn suggest_symmetry(bundle: &AnalysisBundle) -> Option<Suggestion> {
    let s = &bundle.symmetry;
    if !(s.score > SYMMETRY_MIN_SCORE) {
        return None;
    }
    let dx = 0.5 - s.axis_x;
    if near(dx, SYMMETRY_TOLERANCE) {
        return None;
    }
    Some(Suggestion::new(
        SuggestionRule::Symmetry,
        format!(
            "Slide {} to center the symmetry",
            if dx > 0.0 { "right" } else { "left" }
        ),
        vec![Nudge::pan(dx * 0.6, 0.0)],
        (dx.abs() * 200.0).min(100.0),
        dx.abs() * 100.0,
    ))
}

fn suggest_spiral(bundle: &AnalysisBundle) -> Option<Suggestion> {
    let spiral = &bundle.spiral;
    let eye = spiral.eye?;
    let subject = bundle.subject.trusted_center()?;
    let dx = eye.x - subject.x;
    let dy = eye.y - subject.y;
    if !(dx.hypot(dy) > SPIRAL_EYE_DISTANCE || spiral.score < SPIRAL_MIN_SCORE) {
        return None;
    }
    let degrees = match spiral.orientation {
        SpiralOrientation::Identity | SpiralOrientation::MirrorY => -SPIRAL_ROTATION_DEG,
        SpiralOrientation::MirrorX | SpiralOrientation::MirrorXY => SPIRAL_ROTATION_DEG,
    };
    let (pdx, pdy) = (cap(-dx * 0.5), cap(-dy * 0.5));
    Some(Suggestion::new(
        SuggestionRule::Spiral,
        format!(
            "Nudge framing toward the spiral eye and rotate ~{}°",
            degrees.abs()
        ),
        vec![Nudge::Pan { dx: pdx, dy: pdy }, Nudge::Rotate { degrees }],
        30.0 + (1.0 - spiral.score).clamp(0.0, 1.0) * 50.0,
        pdx.hypot(pdy) * 100.0 + degrees.abs(),
    ))
}

fn suggest_leading(bundle: &AnalysisBundle) -> Option<Suggestion> {
    let leading = &bundle.leading;
    leading.vanishing_point?;
    let gain = if leading.convergence < LEADING_CONVERGENCE {
        25.0
    } else {
        12.0
    };
    Some(Suggestion::new(
        SuggestionRule::Leading,
        "Tilt down a little to bring the vanishing point toward the upper third".to_owned(),
        vec![Nudge::pan(0.0, LEADING_TILT)],
        gain,
        LEADING_TILT.abs() * 100.0,
    ))
}

/// Prefix `base` with direction words for a desired subject displacement
/// `(dx, dy)`, e.g. "Pan left and tilt up – Place the subject ...".
pub fn phrase_pan(dx: f32, dy: f32, base: &str) -> String {
    let mut parts = Vec::new();
    if dx.abs() > PHRASE_THRESHOLD {
        // The subject moves right in the frame when the camera pans left.
        parts.push(if dx > 0.0 { "pan left" } else { "pan right" });
    }
    if dy.abs() > PHRASE_THRESHOLD {
        parts.push(if dy > 0.0 { "tilt up" } else { "tilt down" });
    }
    if parts.is_empty() {
        return base.to_owned();
    }
    let joined = parts.join(" and ");
    let mut chars = joined.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{capitalized} – {base}")
}

#[inline]
fn near(v: f32, tol: f32) -> bool {
    v.abs() <= tol
}

#[inline]
fn cap(v: f32) -> f32 {
    v.clamp(-MAX_PAN, MAX_PAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DiagonalResult, FrameSize, GridScoreResult, HorizonEstimate, LeadingResult,
        NormalizedPoint, PixelPoint, SpiralResult, SubjectEstimate, SymmetryResult,
    };

    /// Bundle in which no rule's precondition holds.
    fn quiet_bundle() -> AnalysisBundle {
        AnalysisBundle {
            scale: 1.0,
            frame: FrameSize {
                width: 640,
                height: 480,
            },
            subject: SubjectEstimate::sentinel(),
            horizon: HorizonEstimate::none(),
            thirds: GridScoreResult::zero(),
            phi: GridScoreResult::zero(),
            spiral: SpiralResult {
                score: 0.0,
                orientation: SpiralOrientation::Identity,
                eye: None,
            },
            symmetry: SymmetryResult {
                score: 0.0,
                axis_x: 0.5,
            },
            diagonal: DiagonalResult {
                score: 0.0,
                best: DiagonalDirection::TopLeftToBottomRight,
            },
            leading: LeadingResult::none(),
        }
    }

    #[test]
    fn aligned_subject_yields_no_suggestions() {
        let mut b = quiet_bundle();
        b.subject = SubjectEstimate {
            center: NormalizedPoint::new(1.0 / 3.0 + 0.005, 2.0 / 3.0 - 0.008),
            confidence: 0.9,
        };
        assert!(suggest(&b).is_empty());
    }

    #[test]
    fn thirds_pan_moves_camera_opposite_subject() {
        let mut b = quiet_bundle();
        b.subject = SubjectEstimate {
            center: NormalizedPoint::new(0.5, 0.5),
            confidence: 0.9,
        };
        let out = suggest(&b);
        assert_eq!(out.len(), 1);
        let s = &out[0];
        assert_eq!(s.rule, SuggestionRule::Thirds);
        // Nearest target is (1/3, 1/3): the subject should move up-left.
        match s.nudges[0] {
            Nudge::Pan { dx, dy } => {
                assert!((dx - 1.0 / 12.0).abs() < 1e-5, "dx {dx}");
                assert!((dy - 1.0 / 12.0).abs() < 1e-5, "dy {dy}");
            }
            other => panic!("unexpected nudge {other:?}"),
        }
        assert_eq!(
            s.message,
            "Pan right and tilt down – Place the subject on the nearest third"
        );
        assert!((s.priority - s.estimated_gain / s.effort).abs() < 1e-4);
    }

    #[test]
    fn horizon_tilts_toward_nearest_third() {
        let mut b = quiet_bundle();
        b.horizon = HorizonEstimate {
            y: 0.45,
            confidence: 0.8,
        };
        let out = suggest(&b);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rule, SuggestionRule::Horizon);
        assert_eq!(
            out[0].message,
            "Tilt up to bring the horizon to the upper third"
        );
        match out[0].nudges[0] {
            Nudge::Pan { dx, dy } => {
                assert_eq!(dx, 0.0);
                assert!((dy - (0.45 - 1.0 / 3.0) * 0.6).abs() < 1e-5);
            }
            other => panic!("unexpected nudge {other:?}"),
        }

        b.horizon.y = 0.34;
        assert!(suggest(&b).is_empty());
    }

    #[test]
    fn diagonal_and_symmetry_rules() {
        let mut b = quiet_bundle();
        b.diagonal = DiagonalResult {
            score: 0.4,
            best: DiagonalDirection::TopRightToBottomLeft,
        };
        b.symmetry = SymmetryResult {
            score: 0.7,
            axis_x: 0.45,
        };
        let out = suggest(&b);
        assert_eq!(out.len(), 2);
        let diag = out
            .iter()
            .find(|s| s.rule == SuggestionRule::Diagonal)
            .expect("diagonal");
        assert_eq!(diag.nudges, vec![Nudge::Rotate { degrees: 3.0 }]);
        assert!((diag.estimated_gain - 50.0).abs() < 1e-4);
        assert!((diag.priority - 50.0 / 3.0).abs() < 1e-4);
        let sym = out
            .iter()
            .find(|s| s.rule == SuggestionRule::Symmetry)
            .expect("symmetry");
        assert_eq!(sym.message, "Slide right to center the symmetry");

        b.diagonal.score = 0.9;
        b.symmetry.score = 0.3;
        assert!(suggest(&b).is_empty());
    }

    #[test]
    fn pans_are_capped_and_list_is_truncated() {
        let mut b = quiet_bundle();
        b.subject = SubjectEstimate {
            center: NormalizedPoint::new(0.98, 0.98),
            confidence: 0.9,
        };
        b.horizon = HorizonEstimate {
            y: 0.95,
            confidence: 0.9,
        };
        b.diagonal.score = 0.1;
        b.symmetry = SymmetryResult {
            score: 0.9,
            axis_x: 0.55,
        };
        b.spiral = SpiralResult {
            score: 0.3,
            orientation: SpiralOrientation::MirrorX,
            eye: Some(NormalizedPoint::new(0.38, 0.5)),
        };
        b.leading = LeadingResult {
            convergence: 0.4,
            vanishing_point: Some(PixelPoint::new(300.0, 100.0)),
            kept_segments: Vec::new(),
        };
        let out = suggest(&b);
        assert_eq!(out.len(), MAX_SUGGESTIONS);
        for w in out.windows(2) {
            assert!(w[0].priority >= w[1].priority);
        }
        for s in &out {
            for n in &s.nudges {
                if let Nudge::Pan { dx, dy } = n {
                    assert!(dx.abs() <= MAX_PAN && dy.abs() <= MAX_PAN);
                }
            }
        }
        let spiral = suggest_spiral(&b).expect("spiral applies");
        match spiral.nudges.as_slice() {
            [Nudge::Pan { dx, .. }, Nudge::Rotate { degrees }] => {
                assert!((dx - 0.25).abs() < 1e-6);
                assert_eq!(*degrees, 2.0);
            }
            other => panic!("unexpected nudges {other:?}"),
        }
    }

    #[test]
    fn leading_requires_vanishing_point() {
        let mut b = quiet_bundle();
        b.leading.convergence = 0.9;
        assert!(suggest(&b).is_empty());
        b.leading.vanishing_point = Some(PixelPoint::new(10.0, 10.0));
        let out = suggest(&b);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].estimated_gain, 12.0);
        assert!((out[0].priority - 3.0).abs() < 1e-5);
    }

    #[test]
    fn spiral_needs_trusted_subject() {
        let mut b = quiet_bundle();
        b.spiral = SpiralResult {
            score: 0.2,
            orientation: SpiralOrientation::Identity,
            eye: Some(NormalizedPoint::new(0.62, 0.5)),
        };
        assert!(suggest(&b).is_empty());
    }

    #[test]
    fn phrasing() {
        assert_eq!(phrase_pan(0.0, 0.0, "Base"), "Base");
        assert_eq!(phrase_pan(0.1, 0.0, "Base"), "Pan left – Base");
        assert_eq!(phrase_pan(0.0, -0.1, "Base"), "Tilt down – Base");
    }

    #[test]
    fn nudges_serialize_with_kind_tag() {
        let json = serde_json::to_string(&Nudge::Zoom {
            delta_fraction: 0.1,
        })
        .expect("serialize");
        assert_eq!(json, r#"{"kind":"zoom","deltaFraction":0.1}"#);
        let json = serde_json::to_string(&Nudge::Rotate { degrees: -3.0 }).expect("serialize");
        assert_eq!(json, r#"{"kind":"rotate","degrees":-3.0}"#);
    }
}
