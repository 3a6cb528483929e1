//! Horizon height from near-horizontal segments.
//!
//! The estimate is the length-weighted mean of segment midpoints, so long
//! lines dominate and short spurious edges barely move it. Confidence is the
//! total qualifying length over twice the frame width, clamped to `[0, 1]`.
use super::{clamp01, HorizonOptions};
use crate::edges::EdgeMap;
use crate::error::AnalysisError;
use crate::hough::HoughOptions;
use crate::primitives::VisionPrimitives;
use crate::types::{FrameSize, HorizonEstimate, LineSegment};
use log::debug;

/// Detect segments on `edges` and estimate the horizon from them.
pub fn estimate_horizon<P: VisionPrimitives + ?Sized>(
    prims: &P,
    edges: &EdgeMap,
    hough: &HoughOptions,
    opts: &HorizonOptions,
) -> Result<HorizonEstimate, AnalysisError> {
    let segments = prims.detect_lines(edges, hough)?;
    let frame = FrameSize {
        width: edges.width(),
        height: edges.height(),
    };
    Ok(horizon_from_segments(&segments, frame, opts))
}

/// Horizon estimate from already-detected small-pixel segments.
pub fn horizon_from_segments(
    segments: &[LineSegment],
    frame: FrameSize,
    opts: &HorizonOptions,
) -> HorizonEstimate {
    if frame.width == 0 || frame.height == 0 {
        return HorizonEstimate::none();
    }
    let (weight, weighted_y) = segments
        .iter()
        .filter(|s| s.abs_sin() < opts.max_abs_sin && s.length() >= opts.min_length)
        .fold((0.0f32, 0.0f32), |(w, wy), s| {
            let len = s.length();
            (w + len, wy + len * s.midpoint_y())
        });
    if weight <= 0.0 {
        debug!("horizon: no qualifying horizontal segments");
        return HorizonEstimate::none();
    }

    let y = clamp01(weighted_y / weight / frame.height as f32);
    let confidence = clamp01(weight / (2.0 * frame.width as f32));
    debug!("horizon: y {y:.3}, length {weight:.1}, confidence {confidence:.3}");
    HorizonEstimate { y, confidence }
}
