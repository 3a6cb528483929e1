//! Vertical mirror symmetry.
//!
//! Pipeline
//! - Downscale the edge mask by `max(1, round(min_side / target_min_side))`.
//! - Flip it horizontally (mirror about the frame center).
//! - For each candidate axis `a`, roll the flipped mask by
//!   `round((2a − 1) · width)` columns so it mirrors about `a` instead, and
//!   score `IoU = |A ∩ B| / |A ∪ B|` against the unflipped mask.
//!
//! The roll wraps columns rather than zero-padding, so edge content near
//! the frame border is still compared. An empty union scores 0.
use super::{clamp01, SymmetryOptions};
use crate::edges::EdgeMap;
use crate::error::AnalysisError;
use crate::primitives::VisionPrimitives;
use crate::types::SymmetryResult;
use log::debug;

pub fn score_symmetry<P: VisionPrimitives + ?Sized>(
    prims: &P,
    edges: &EdgeMap,
    opts: &SymmetryOptions,
) -> Result<SymmetryResult, AnalysisError> {
    let mut best = SymmetryResult {
        score: 0.0,
        axis_x: 0.5,
    };
    let (w, h) = (edges.width(), edges.height());
    let target = opts.target_min_side.max(1) as f32;
    let down = ((w.min(h) as f32 / target).round() as usize).max(1);
    let (sw, sh) = (w / down, h / down);
    if sw == 0 || sh == 0 {
        return Ok(best);
    }

    let small = if down == 1 {
        edges.clone()
    } else {
        prims.resize_mask(edges, sw, sh)?
    };
    let flipped = prims.flip_horizontal(&small)?;

    for &offset in &opts.axis_offsets {
        let axis = 0.5 + offset;
        let shift = ((2.0 * axis - 1.0) * sw as f32).round() as isize;
        let mirrored = flipped.roll_columns(shift);

        let inter = prims.count_nonzero(&prims.bitwise_and(&small, &mirrored)?)?;
        let union = prims.count_nonzero(&prims.bitwise_or(&small, &mirrored)?)?;
        let score = if union > 0 {
            clamp01(inter as f32 / union as f32)
        } else {
            0.0
        };
        if score > best.score {
            best = SymmetryResult {
                score,
                axis_x: axis,
            };
        }
    }

    debug!(
        "symmetry: {sw}x{sh} mask, IoU {:.3} at axis {:.3}",
        best.score, best.axis_x
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::NativePrimitives;

    #[test]
    fn mirrored_bars_score_one_at_center() {
        // Bars at x = 30 and x = 129 mirror each other about the center of a 160-wide mask.
        let edges = EdgeMap::from_fn(160, 120, |x, y| (x == 30 || x == 129) && y > 10);
        let r = score_symmetry(&NativePrimitives, &edges, &SymmetryOptions::default())
            .expect("native provider");
        assert_eq!(r.score, 1.0);
        assert_eq!(r.axis_x, 0.5);
    }

    #[test]
    fn off_center_axis_is_found() {
        // Mirror pair about x = 88 (axis 0.55 of a 160-wide mask): 60 ↔ 115.
        let edges = EdgeMap::from_fn(160, 120, |x, _| x == 60 || x == 115);
        let r = score_symmetry(&NativePrimitives, &edges, &SymmetryOptions::default())
            .expect("native provider");
        assert!((r.axis_x - 0.55).abs() < 1e-6, "axis {}", r.axis_x);
        assert_eq!(r.score, 1.0);
    }

    #[test]
    fn empty_mask_scores_zero() {
        let empty = EdgeMap::new(640, 480);
        let r = score_symmetry(&NativePrimitives, &empty, &SymmetryOptions::default())
            .expect("native provider");
        assert_eq!(r, SymmetryResult { score: 0.0, axis_x: 0.5 });
    }

    #[test]
    fn large_masks_are_downscaled() {
        let edges = EdgeMap::from_fn(1280, 960, |x, _| x == 200 || x == 1079);
        let r = score_symmetry(&NativePrimitives, &edges, &SymmetryOptions::default())
            .expect("native provider");
        assert!(r.score > 0.9, "score {}", r.score);
        assert_eq!(r.axis_x, 0.5);
    }
}
