//! Rule analyzers: stateless functions from extracted features to bounded
//! per-rule results.
//!
//! | Analyzer | Consumes | Produces |
//! |---|---|---|
//! | [`subject`] | small grayscale | [`SubjectEstimate`](crate::types::SubjectEstimate) |
//! | [`horizon`] | line segments | [`HorizonEstimate`](crate::types::HorizonEstimate) |
//! | [`leading`] | line segments + RNG | [`LeadingResult`](crate::types::LeadingResult) |
//! | [`grid`] | subject + horizon | thirds / phi [`GridScoreResult`](crate::types::GridScoreResult) |
//! | [`spiral`] | edge map + subject | [`SpiralResult`](crate::types::SpiralResult) |
//! | [`symmetry`] | edge map | [`SymmetryResult`](crate::types::SymmetryResult) |
//! | [`diagonal`] | edge map | [`DiagonalResult`](crate::types::DiagonalResult) |
//!
//! Only the leading-lines estimator is randomized, and it takes its random
//! source as an argument.

pub mod diagonal;
pub mod grid;
pub mod horizon;
pub mod leading;
mod options;
pub mod spiral;
pub mod subject;
pub mod symmetry;

pub use diagonal::score_diagonal;
pub use grid::{score_grid, score_phi, score_thirds, GridTargets, PHI_TARGETS, THIRDS_TARGETS};
pub use horizon::{estimate_horizon, horizon_from_segments};
pub use leading::{analyze_leading, leading_from_segments};
pub use options::{
    DiagonalOptions, GridOptions, HorizonOptions, LeadingOptions, SpiralOptions, SubjectOptions,
    SymmetryOptions,
};
pub use spiral::{build_spiral, score_spiral};
pub use subject::estimate_subject;
pub use symmetry::score_symmetry;

/// `exp(-d² / s²)`: 1 at `d = 0`, falling off smoothly with distance.
#[inline]
pub(crate) fn gaussian_falloff(d: f32, s: f32) -> f32 {
    (-(d * d) / (s * s)).exp()
}

#[inline]
pub(crate) fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
