//! Display-oriented rule scores.
//!
//! Maps each analyzer's `[0, 1]` output onto an integer `0..=100` scale with
//! a short justification string. The output is a pure function of the
//! bundle: two calls on the same bundle produce identical, identically
//! ordered lists (score descending, ties by rule key).
//!
//! Blends
//! - Leading lines: `clamp(0.9 · convergence + 0.15 · symmetry)`.
//! - Horizon on thirds: `horizon confidence · thirds horizon score`.
//! - Everything else is the analyzer's score as-is.
use crate::types::AnalysisBundle;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Subject confidence above which the subject term is mentioned in reasons.
const SUBJECT_REASON_CONFIDENCE: f32 = 0.3;
/// Maximum leading-lines bonus granted by a perfectly symmetric frame.
const LEADING_SYMMETRY_BONUS: f32 = 0.15;
const LEADING_CONVERGENCE_WEIGHT: f32 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKey {
    RuleOfThirds,
    PhiGrid,
    GoldenSpiral,
    LeadingLines,
    Diagonals,
    Symmetry,
    HorizonOnThirds,
}

impl RuleKey {
    pub const ALL: [Self; 7] = [
        Self::RuleOfThirds,
        Self::PhiGrid,
        Self::GoldenSpiral,
        Self::LeadingLines,
        Self::Diagonals,
        Self::Symmetry,
        Self::HorizonOnThirds,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RuleOfThirds => "rule_of_thirds",
            Self::PhiGrid => "phi_grid",
            Self::GoldenSpiral => "golden_spiral",
            Self::LeadingLines => "leading_lines",
            Self::Diagonals => "diagonals",
            Self::Symmetry => "symmetry",
            Self::HorizonOnThirds => "horizon_on_thirds",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RuleOfThirds => "Rule of Thirds",
            Self::PhiGrid => "Golden Ratio (Φ grid)",
            Self::GoldenSpiral => "Golden Spiral",
            Self::LeadingLines => "Leading Lines",
            Self::Diagonals => "Diagonal Method",
            Self::Symmetry => "Vertical Symmetry",
            Self::HorizonOnThirds => "Horizon on Thirds",
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleScore {
    pub key: RuleKey,
    /// `0..=100`.
    pub score: u8,
    pub label: String,
    pub reason: String,
}

impl RuleScore {
    fn new(key: RuleKey, value: f32, reason: String) -> Self {
        Self {
            key,
            score: to_percent(value),
            label: key.label().to_owned(),
            reason,
        }
    }
}

fn to_percent(v: f32) -> u8 {
    let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    (v * 100.0).round() as u8
}

fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Score every rule for `bundle`, best first.
pub fn compute_rule_scores(bundle: &AnalysisBundle) -> Vec<RuleScore> {
    let subject_trusted = bundle.subject.confidence > SUBJECT_REASON_CONFIDENCE;
    let horizon = bundle.horizon.trusted_y().map(|_| bundle.horizon.confidence);

    let grid_reason = |subject_score: f32, horizon_score: f32| {
        let mut parts = Vec::new();
        if subject_trusted {
            parts.push(format!("subject≈{subject_score:.2}"));
        }
        if horizon.is_some() {
            parts.push(format!("horizon≈{horizon_score:.2}"));
        }
        if parts.is_empty() {
            "low subject/horizon confidence".to_owned()
        } else {
            parts.join(", ")
        }
    };

    let convergence = clamp01(bundle.leading.convergence);
    let sym_bonus = clamp01(bundle.symmetry.score) * LEADING_SYMMETRY_BONUS;
    let leading = clamp01(convergence * LEADING_CONVERGENCE_WEIGHT + sym_bonus);
    let leading_reason = if sym_bonus > 0.0 {
        format!("convergence≈{convergence:.2} (+sym≈{sym_bonus:.2})")
    } else {
        format!("convergence≈{convergence:.2}")
    };

    let (horizon_thirds, horizon_reason) = match horizon {
        Some(conf) => (
            clamp01(conf) * clamp01(bundle.thirds.horizon_score),
            format!(
                "conf≈{conf:.2}, align≈{:.2}",
                bundle.thirds.horizon_score
            ),
        ),
        None => (0.0, "no horizon".to_owned()),
    };

    let mut items = vec![
        RuleScore::new(
            RuleKey::RuleOfThirds,
            bundle.thirds.overall,
            grid_reason(bundle.thirds.subject_score, bundle.thirds.horizon_score),
        ),
        RuleScore::new(
            RuleKey::PhiGrid,
            bundle.phi.overall,
            grid_reason(bundle.phi.subject_score, bundle.phi.horizon_score),
        ),
        RuleScore::new(
            RuleKey::GoldenSpiral,
            bundle.spiral.score,
            format!("edge-fit≈{:.2}", bundle.spiral.score),
        ),
        RuleScore::new(RuleKey::LeadingLines, leading, leading_reason),
        RuleScore::new(
            RuleKey::Diagonals,
            bundle.diagonal.score,
            format!(
                "best={}, density≈{:.2}",
                bundle.diagonal.best.short_name(),
                bundle.diagonal.score
            ),
        ),
        RuleScore::new(
            RuleKey::Symmetry,
            bundle.symmetry.score,
            format!("IoU≈{:.2}", bundle.symmetry.score),
        ),
        RuleScore::new(RuleKey::HorizonOnThirds, horizon_thirds, horizon_reason),
    ];

    items.sort_by(compare_scores);
    items
}

fn compare_scores(a: &RuleScore, b: &RuleScore) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.key.as_str().cmp(b.key.as_str()))
}

/// At most `max` entries scoring at least `min_score`, in input order.
pub fn top_matches(items: &[RuleScore], min_score: u8, max: usize) -> Vec<RuleScore> {
    items
        .iter()
        .filter(|r| r.score >= min_score)
        .take(max)
        .cloned()
        .collect()
}

/// Threshold and count used when surfacing strong matches.
pub const DEFAULT_TOP_MIN_SCORE: u8 = 55;
pub const DEFAULT_TOP_COUNT: usize = 3;
