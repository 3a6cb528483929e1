//! Golden-spiral fit.
//!
//! A logarithmic spiral `r = a·exp(b·t·turns)`, `θ = 2π·t·turns`, centered
//! on the frame and sampled at `samples` points, is tried in the four
//! mirror orientations. Each orientation scores the mean edge density in a
//! small window around every sample; with a trusted subject the score is
//! multiplied by `exp(-d²/k²)` of the subject-to-eye distance.
//!
//! Complexity: `O(4 · samples · (2r + 1)²)` with `r` about 1% of the short side.
use super::{clamp01, gaussian_falloff, SpiralOptions};
use crate::edges::EdgeMap;
use crate::types::{NormalizedPoint, SpiralOrientation, SpiralResult};
use log::debug;
use std::f32::consts::TAU;

/// Sample points of the spiral in `orientation`, tightest point first.
pub fn build_spiral(orientation: SpiralOrientation, opts: &SpiralOptions) -> Vec<NormalizedPoint> {
    let k = opts.samples.max(2);
    (0..k)
        .map(|i| {
            let t = i as f32 / (k - 1) as f32;
            let r = opts.start_radius * (opts.growth * t * opts.turns).exp();
            let ang = TAU * t * opts.turns;
            let mut x = 0.5 + r * ang.cos();
            let mut y = 0.5 + r * ang.sin();
            if orientation.mirrors_x() {
                x = 1.0 - x;
            }
            if orientation.mirrors_y() {
                y = 1.0 - y;
            }
            NormalizedPoint::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
        })
        .collect()
}

pub fn score_spiral(
    edges: &EdgeMap,
    subject: Option<NormalizedPoint>,
    opts: &SpiralOptions,
) -> SpiralResult {
    let mut best = SpiralResult {
        score: 0.0,
        orientation: SpiralOrientation::Identity,
        eye: None,
    };
    if edges.is_empty() {
        return best;
    }
    let (w, h) = (edges.width(), edges.height());
    let radius = ((w.min(h) as f32 * opts.window_fraction).round() as usize).max(1);

    for orientation in SpiralOrientation::ALL {
        let pts = build_spiral(orientation, opts);
        let Some(&eye) = pts.first() else {
            continue;
        };
        let density: f32 = pts
            .iter()
            .map(|p| {
                let x = (p.x * (w - 1) as f32).round() as usize;
                let y = (p.y * (h - 1) as f32).round() as usize;
                window_density(edges, x, y, radius)
            })
            .sum::<f32>()
            / pts.len() as f32;

        let score = match subject {
            Some(s) => density * gaussian_falloff(s.distance(&eye), opts.eye_sigma),
            None => density,
        };
        if score > best.score {
            best = SpiralResult {
                score,
                orientation,
                eye: Some(eye),
            };
        }
    }

    best.score = clamp01(best.score);
    debug!("spiral: {:?} score {:.3}", best.orientation, best.score);
    best
}

/// Fraction of edge pixels in the clamped `(2r + 1)²` window around `(x, y)`.
fn window_density(edges: &EdgeMap, x: usize, y: usize, r: usize) -> f32 {
    let x0 = x.saturating_sub(r);
    let x1 = (x + r).min(edges.width() - 1);
    let y0 = y.saturating_sub(r);
    let y1 = (y + r).min(edges.height() - 1);
    let mut hits = 0usize;
    for yy in y0..=y1 {
        for xx in x0..=x1 {
            if edges.is_edge(xx, yy) {
                hits += 1;
            }
        }
    }
    hits as f32 / ((x1 - x0 + 1) * (y1 - y0 + 1)) as f32
}
