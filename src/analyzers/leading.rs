//! Leading lines and their vanishing point.
//!
//! Pipeline
//! - Candidates: segments with `|sin| >= min_abs_sin` (horizontal structure
//!   belongs to the horizon estimator) and `length >= min_length`, each in
//!   unit-normal form `ax + by + c = 0`.
//! - Two-line RANSAC: a fixed number of random distinct pairs; their
//!   intersection (homogeneous cross product) is scored by how many
//!   candidate lines pass within `inlier_tolerance_px`.
//! - `convergence = best_inliers / candidates`.
//! - Optional least-squares polish of the winning point over its inliers.
//! - Display list: the `max_kept_segments` longest candidates, longest first.
//!
//! Notes
//! - Near-parallel pairs (|det| below `parallel_epsilon`) are skipped.
//! - The random source is injected so tests can seed it.
use super::{clamp01, LeadingOptions};
use crate::edges::EdgeMap;
use crate::error::AnalysisError;
use crate::hough::HoughOptions;
use crate::primitives::VisionPrimitives;
use crate::types::{LeadingResult, LineSegment, PixelPoint};
use log::debug;
use nalgebra::{Matrix2, Vector2, Vector3};
use rand::Rng;

/// Detect segments on `edges` and run the vanishing-point estimator.
pub fn analyze_leading<P, R>(
    prims: &P,
    edges: &EdgeMap,
    hough: &HoughOptions,
    opts: &LeadingOptions,
    rng: &mut R,
) -> Result<LeadingResult, AnalysisError>
where
    P: VisionPrimitives + ?Sized,
    R: Rng + ?Sized,
{
    let segments = prims.detect_lines(edges, hough)?;
    Ok(leading_from_segments(&segments, opts, rng))
}

struct Candidate {
    seg: LineSegment,
    line: Vector3<f32>,
}

pub fn leading_from_segments<R: Rng + ?Sized>(
    segments: &[LineSegment],
    opts: &LeadingOptions,
    rng: &mut R,
) -> LeadingResult {
    let mut candidates: Vec<Candidate> = segments
        .iter()
        .filter(|s| s.length() >= opts.min_length && s.abs_sin() >= opts.min_abs_sin)
        .filter_map(|s| s.normal_form().map(|line| Candidate { seg: *s, line }))
        .collect();
    if candidates.len() < 2 {
        debug!("leading: {} candidate line(s), skipping VP", candidates.len());
        return LeadingResult::none();
    }

    let n = candidates.len();
    let mut best: Option<(usize, Vector2<f32>)> = None;
    for _ in 0..opts.iterations {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n - 1);
        let j = if j >= i { j + 1 } else { j };

        let Some(p) = intersect(&candidates[i].line, &candidates[j].line, opts.parallel_epsilon)
        else {
            continue;
        };
        let inliers = count_inliers(&candidates, &p, opts.inlier_tolerance_px);
        if best.map_or(true, |(count, _)| inliers > count) {
            best = Some((inliers, p));
        }
    }

    let (convergence, vanishing_point) = match best {
        Some((count, p)) => {
            let p = if opts.refine_on_inliers {
                refine_on_inliers(&candidates, &p, opts.inlier_tolerance_px).unwrap_or(p)
            } else {
                p
            };
            (
                clamp01(count as f32 / n as f32),
                Some(PixelPoint::new(p.x, p.y)),
            )
        }
        None => (0.0, None),
    };
    debug!(
        "leading: {n} candidates, convergence {convergence:.3}, vp {:?}",
        vanishing_point
    );

    candidates.sort_by(|a, b| b.seg.length().total_cmp(&a.seg.length()));
    let kept_segments = candidates
        .iter()
        .take(opts.max_kept_segments)
        .map(|c| c.seg)
        .collect();

    LeadingResult {
        convergence,
        vanishing_point,
        kept_segments,
    }
}

/// Intersection of two lines in normal form; `None` when near-parallel.
fn intersect(l1: &Vector3<f32>, l2: &Vector3<f32>, eps: f32) -> Option<Vector2<f32>> {
    let p = l1.cross(l2);
    if p.z.abs() < eps {
        return None;
    }
    Some(Vector2::new(p.x / p.z, p.y / p.z))
}

fn line_distance(line: &Vector3<f32>, p: &Vector2<f32>) -> f32 {
    (line.x * p.x + line.y * p.y + line.z).abs()
}

fn count_inliers(candidates: &[Candidate], p: &Vector2<f32>, tol: f32) -> usize {
    candidates
        .iter()
        .filter(|c| line_distance(&c.line, p) <= tol)
        .count()
}

/// Point minimizing `Σ (a x + b y + c)²` over the inlier lines of `p`.
fn refine_on_inliers(candidates: &[Candidate], p: &Vector2<f32>, tol: f32) -> Option<Vector2<f32>> {
    let mut normal = Matrix2::<f32>::zeros();
    let mut rhs = Vector2::<f32>::zeros();
    for c in candidates.iter().filter(|c| line_distance(&c.line, p) <= tol) {
        let ab = Vector2::new(c.line.x, c.line.y);
        normal += ab * ab.transpose();
        rhs -= ab * c.line.z;
    }
    let trace = normal.trace();
    if normal.determinant().abs() <= 1e-6f32.max(1e-6 * trace * trace) {
        debug!("leading: inlier normal matrix near-singular, keeping sampled VP");
        return None;
    }
    normal.try_inverse().map(|inv| inv * rhs)
}
