//! Gradient-saliency subject estimate.
//!
//! Pipeline
//! - Gradient magnitude of the small grayscale image.
//! - Area downsample by `downsample_factor` so the peak reflects a region
//!   rather than a single sharp pixel.
//! - Global maximum → subject cell; the center of the cell (not its corner)
//!   is reported in normalized space.
//! - `confidence = tanh(max(0, peak / mean − 1) / 4)`.
//!
//! This estimator never fails: a primitive error is logged and replaced by
//! [`SubjectEstimate::sentinel`].
use super::{clamp01, SubjectOptions};
use crate::error::AnalysisError;
use crate::image::ImageF32;
use crate::primitives::VisionPrimitives;
use crate::types::{NormalizedPoint, SubjectEstimate};
use log::{debug, warn};

/// Mean used when the downsampled map averages to zero.
const MIN_MEAN: f32 = 1e-3;

pub fn estimate_subject<P: VisionPrimitives + ?Sized>(
    prims: &P,
    gray: &ImageF32,
    opts: &SubjectOptions,
) -> SubjectEstimate {
    match try_estimate(prims, gray, opts) {
        Ok(subject) => subject,
        Err(err) => {
            warn!("subject: {err}; falling back to frame center");
            SubjectEstimate::sentinel()
        }
    }
}

fn try_estimate<P: VisionPrimitives + ?Sized>(
    prims: &P,
    gray: &ImageF32,
    opts: &SubjectOptions,
) -> Result<SubjectEstimate, AnalysisError> {
    if gray.w == 0 || gray.h == 0 {
        return Err(AnalysisError::EmptyImage);
    }
    let mag = prims.gradient_magnitude(gray)?;

    let factor = opts.downsample_factor.max(1) as f32;
    let sw = ((gray.w as f32 / factor).round() as usize).max(1);
    let sh = ((gray.h as f32 / factor).round() as usize).max(1);
    let small = prims.resize_area(&mag, sw, sh)?;

    let peak = prims.max_location(&small)?;
    if !(peak.value > 0.0) {
        debug!("subject: no gradient energy");
        return Ok(SubjectEstimate::sentinel());
    }
    let mut mean = prims.mean(&small)?;
    if !(mean > 0.0) {
        mean = MIN_MEAN;
    }

    let contrast = (peak.value / mean - 1.0).max(0.0);
    let confidence = clamp01((contrast / 4.0).tanh());
    let center = NormalizedPoint::new(
        (peak.x as f32 + 0.5) / sw as f32,
        (peak.y as f32 + 0.5) / sh as f32,
    );
    debug!(
        "subject: cell ({}, {}) of {sw}x{sh}, peak/mean {:.2}, confidence {confidence:.3}",
        peak.x,
        peak.y,
        peak.value / mean
    );
    Ok(SubjectEstimate { center, confidence })
}
