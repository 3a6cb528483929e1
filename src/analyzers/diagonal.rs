//! Diagonal method: edge density in a band around each frame diagonal.
use super::{clamp01, DiagonalOptions};
use crate::edges::EdgeMap;
use crate::types::{DiagonalDirection, DiagonalResult};
use log::debug;

pub fn score_diagonal(edges: &EdgeMap, opts: &DiagonalOptions) -> DiagonalResult {
    let tlbr = band_density(edges, DiagonalDirection::TopLeftToBottomRight, opts);
    let trbl = band_density(edges, DiagonalDirection::TopRightToBottomLeft, opts);
    debug!("diagonal: TLBR {tlbr:.3}, TRBL {trbl:.3}");
    if tlbr >= trbl {
        DiagonalResult {
            score: tlbr,
            best: DiagonalDirection::TopLeftToBottomRight,
        }
    } else {
        DiagonalResult {
            score: trbl,
            best: DiagonalDirection::TopRightToBottomLeft,
        }
    }
}

/// Fraction of stride-sampled pixels within the band that are edges.
fn band_density(edges: &EdgeMap, dir: DiagonalDirection, opts: &DiagonalOptions) -> f32 {
    let (w, h) = (edges.width(), edges.height());
    if w == 0 || h == 0 {
        return 0.0;
    }
    let min_side = w.min(h);
    let band = (min_side as f32 * opts.band_fraction).round().max(1.0);
    let step = (min_side / opts.stride_divisor.max(1)).max(1);
    let slope = h as f32 / w as f32;

    let (mut hits, mut total) = (0usize, 0usize);
    for y in (0..h).step_by(step) {
        for x in (0..w).step_by(step) {
            let on_line = match dir {
                DiagonalDirection::TopLeftToBottomRight => slope * x as f32,
                DiagonalDirection::TopRightToBottomLeft => h as f32 - slope * x as f32,
            };
            if (y as f32 - on_line).abs() <= band {
                total += 1;
                if edges.is_edge(x, y) {
                    hits += 1;
                }
            }
        }
    }
    if total == 0 {
        0.0
    } else {
        clamp01(hits as f32 / total as f32)
    }
}
