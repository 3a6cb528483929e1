use imageproc::hough::LineDetectionOptions;
use serde::{Deserialize, Serialize};

/// Parameters of the Hough segment detector.
///
/// The accumulator is fixed at 1 px by 1°; lengths are in small-pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Minimum accumulator votes for a line hypothesis.
    pub vote_threshold: u32,
    /// Radius (in accumulator bins) of the peak suppression window.
    pub suppression_radius: u32,
    /// Segments shorter than this are discarded.
    pub min_line_length: f32,
    /// Largest run of missing edge pixels bridged inside one segment.
    pub max_line_gap: f32,
    /// Cap on line hypotheses walked per image.
    pub max_lines: usize,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            vote_threshold: 60,
            suppression_radius: 4,
            min_line_length: 40.0,
            max_line_gap: 10.0,
            max_lines: 512,
        }
    }
}

impl HoughOptions {
    pub(crate) fn detection(&self) -> LineDetectionOptions {
        LineDetectionOptions {
            vote_threshold: self.vote_threshold.max(1),
            suppression_radius: self.suppression_radius,
        }
    }
}
