use crate::diagnostics::TimingBreakdown;
use crate::edges::EdgeMap;
use crate::image::ImageF32;
use crate::types::AnalysisBundle;
use serde::{Deserialize, Serialize};

/// Output of one analysis pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub bundle: AnalysisBundle,
    /// Segments returned by line detection before any analyzer filtering.
    pub segment_count: usize,
    pub timings: TimingBreakdown,
}

/// Working-resolution features shared by all analyzers.
///
/// Hosts that already hold these can call
/// [`CompositionAnalyzer::analyze_features`](super::CompositionAnalyzer::analyze_features)
/// directly and skip extraction.
#[derive(Clone, Debug)]
pub struct Features {
    /// Un-blurred grayscale in `[0, 1]`, small-pixel space.
    pub gray: ImageF32,
    pub edges: EdgeMap,
    /// `small = original * scale`.
    pub scale: f32,
}
