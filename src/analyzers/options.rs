//! Tunables of the rule analyzers. Pixel quantities are in small-pixel units.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectOptions {
    /// Downsampling factor applied to the gradient-magnitude map.
    pub downsample_factor: usize,
}

impl Default for SubjectOptions {
    fn default() -> Self {
        Self {
            downsample_factor: 8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonOptions {
    /// Segments with `|sin(angle)|` below this count as horizontal.
    pub max_abs_sin: f32,
    pub min_length: f32,
}

impl Default for HorizonOptions {
    fn default() -> Self {
        Self {
            max_abs_sin: 0.2,
            min_length: 40.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadingOptions {
    /// Segments with `|sin(angle)|` below this are left to the horizon estimator.
    pub min_abs_sin: f32,
    pub min_length: f32,
    /// Number of two-line hypotheses drawn.
    pub iterations: usize,
    /// A line is an inlier when it passes within this many pixels of the point.
    pub inlier_tolerance_px: f32,
    /// Pairs whose normal determinant is below this are treated as parallel.
    pub parallel_epsilon: f32,
    /// Longest segments retained for display.
    pub max_kept_segments: usize,
    /// Least-squares polish of the winning point over its inlier lines.
    pub refine_on_inliers: bool,
    /// Fixed seed for the sampler; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LeadingOptions {
    fn default() -> Self {
        Self {
            min_abs_sin: 0.2,
            min_length: 30.0,
            iterations: 200,
            inlier_tolerance_px: 6.0,
            parallel_epsilon: 1e-6,
            max_kept_segments: 100,
            refine_on_inliers: false,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Falloff of the subject-to-target-point score.
    pub subject_sigma: f32,
    /// Falloff of the horizon-to-target-line score.
    pub horizon_tau: f32,
    /// Weight of the subject term when both terms are present.
    pub subject_weight: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            subject_sigma: 0.12,
            horizon_tau: 0.07,
            subject_weight: 0.6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralOptions {
    /// Radius of the spiral at its eye (normalized).
    pub start_radius: f32,
    /// Exponential growth rate per turn fraction.
    pub growth: f32,
    pub turns: f32,
    pub samples: usize,
    /// Half-size of the sampling window as a fraction of the short image side.
    pub window_fraction: f32,
    /// Falloff of the subject-to-eye bonus.
    pub eye_sigma: f32,
}

impl Default for SpiralOptions {
    fn default() -> Self {
        Self {
            start_radius: 0.12,
            growth: 2.0,
            turns: 1.1,
            samples: 160,
            window_fraction: 0.01,
            eye_sigma: 0.18,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymmetryOptions {
    /// Candidate axis offsets from the frame center (normalized).
    pub axis_offsets: Vec<f32>,
    /// The mask is downscaled by `round(min_side / target_min_side)`.
    pub target_min_side: usize,
}

impl Default for SymmetryOptions {
    fn default() -> Self {
        Self {
            axis_offsets: vec![-0.05, -0.025, 0.0, 0.025, 0.05],
            target_min_side: 320,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagonalOptions {
    /// Band half-width as a fraction of the short image side (at least 1px).
    pub band_fraction: f32,
    /// Sampling stride is `max(1, min_side / stride_divisor)`.
    pub stride_divisor: usize,
}

impl Default for DiagonalOptions {
    fn default() -> Self {
        Self {
            band_fraction: 0.01,
            stride_divisor: 512,
        }
    }
}
