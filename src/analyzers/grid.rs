//! Thirds and phi grid scorers.
//!
//! Both share one implementation and differ only in their [`GridTargets`]:
//! four intersection points and the two horizontal lines through them.
//! Subject placement is scored with `exp(-d²/σ²)` on the distance to the
//! nearest target point; the horizon with a tighter `exp(-d²/τ²)` on the
//! distance to the nearest target line.
use super::{clamp01, gaussian_falloff, GridOptions};
use crate::types::{GridScoreResult, NormalizedPoint};

const ONE_THIRD: f32 = 1.0 / 3.0;
const TWO_THIRDS: f32 = 2.0 / 3.0;
/// `1 - 1/φ` and `1/φ` with `φ = (1 + √5) / 2`.
const PHI_MINOR: f32 = 0.381_966_02;
const PHI_MAJOR: f32 = 0.618_033_97;

/// Target layout of a grid rule, in normalized space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTargets {
    pub points: [NormalizedPoint; 4],
    pub lines: [f32; 2],
}

impl GridTargets {
    const fn from_divisions(lo: f32, hi: f32) -> Self {
        Self {
            points: [
                NormalizedPoint::new(lo, lo),
                NormalizedPoint::new(hi, lo),
                NormalizedPoint::new(lo, hi),
                NormalizedPoint::new(hi, hi),
            ],
            lines: [lo, hi],
        }
    }

    /// Closest target point and its distance. Ties go to the first in
    /// `points` order.
    pub fn nearest_point(&self, p: &NormalizedPoint) -> (NormalizedPoint, f32) {
        let mut best = (self.points[0], p.distance(&self.points[0]));
        for t in &self.points[1..] {
            let d = p.distance(t);
            if d < best.1 {
                best = (*t, d);
            }
        }
        best
    }

    /// Closest horizontal target line and the vertical distance to it.
    pub fn nearest_line(&self, y: f32) -> (f32, f32) {
        let [a, b] = self.lines;
        let (da, db) = ((y - a).abs(), (y - b).abs());
        if db < da {
            (b, db)
        } else {
            (a, da)
        }
    }
}

pub const THIRDS_TARGETS: GridTargets = GridTargets::from_divisions(ONE_THIRD, TWO_THIRDS);
pub const PHI_TARGETS: GridTargets = GridTargets::from_divisions(PHI_MINOR, PHI_MAJOR);

/// Score a subject point and a horizon height against `targets`.
///
/// Absent inputs contribute nothing; with both present the overall score
/// is `w·subject + (1 − w)·horizon`.
pub fn score_grid(
    targets: &GridTargets,
    subject: Option<NormalizedPoint>,
    horizon_y: Option<f32>,
    opts: &GridOptions,
) -> GridScoreResult {
    let subject_fit = subject.map(|p| {
        let (target, d) = targets.nearest_point(&p);
        (target, clamp01(gaussian_falloff(d, opts.subject_sigma)))
    });
    let horizon_score = horizon_y.map(|y| {
        let (_, d) = targets.nearest_line(y);
        clamp01(gaussian_falloff(d, opts.horizon_tau))
    });

    let overall = match (subject_fit, horizon_score) {
        (Some((_, s)), Some(h)) => {
            let w = clamp01(opts.subject_weight);
            w * s + (1.0 - w) * h
        }
        (Some((_, s)), None) => s,
        (None, Some(h)) => h,
        (None, None) => 0.0,
    };

    GridScoreResult {
        subject_score: subject_fit.map_or(0.0, |(_, s)| s),
        horizon_score: horizon_score.unwrap_or(0.0),
        overall: clamp01(overall),
        best_target: subject_fit.map(|(t, _)| t),
    }
}

pub fn score_thirds(
    subject: Option<NormalizedPoint>,
    horizon_y: Option<f32>,
    opts: &GridOptions,
) -> GridScoreResult {
    score_grid(&THIRDS_TARGETS, subject, horizon_y, opts)
}

pub fn score_phi(
    subject: Option<NormalizedPoint>,
    horizon_y: Option<f32>,
    opts: &GridOptions,
) -> GridScoreResult {
    score_grid(&PHI_TARGETS, subject, horizon_y, opts)
}
