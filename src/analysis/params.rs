//! Parameter types configuring one analysis pass.
//!
//! Defaults reproduce the reference working resolution (640 px wide),
//! a 3×3 blur and Canny thresholds of 80/160 on 8-bit intensities.
//! Every group deserializes with `#[serde(default)]`, so a JSON config only
//! needs the knobs it changes.
use crate::analyzers::{
    DiagonalOptions, GridOptions, HorizonOptions, LeadingOptions, SpiralOptions, SubjectOptions,
    SymmetryOptions,
};
use crate::hough::HoughOptions;
use serde::{Deserialize, Serialize};

/// Extraction settings applied before any analyzer runs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Working images wider than this are area-downscaled to it.
    pub max_width: usize,
    /// Odd Gaussian aperture applied before edge detection (1 disables).
    pub blur_ksize: usize,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Derivative aperture passed to the edge detector.
    pub canny_aperture: usize,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            max_width: 640,
            blur_ksize: 3,
            canny_low: 80.0,
            canny_high: 160.0,
            canny_aperture: 3,
        }
    }
}

impl PreprocessOptions {
    /// `small = original * scale`; never upscales.
    pub fn scale_for(&self, width: usize) -> f32 {
        if width == 0 || self.max_width == 0 {
            return 1.0;
        }
        (self.max_width as f32 / width as f32).min(1.0)
    }
}

/// All knobs of the analysis pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    pub preprocess: PreprocessOptions,
    /// Line detection shared by the horizon and leading-lines analyzers.
    pub hough: HoughOptions,
    pub subject: SubjectOptions,
    pub horizon: HorizonOptions,
    pub leading: LeadingOptions,
    pub grid: GridOptions,
    pub spiral: SpiralOptions,
    pub symmetry: SymmetryOptions,
    pub diagonal: DiagonalOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "leading": { "seed": 9 }, "preprocess": { "max_width": 320 } }"#;
        let params: AnalyzerParams = serde_json::from_str(json).expect("valid json");
        assert_eq!(params.leading.seed, Some(9));
        assert_eq!(params.leading.iterations, 200);
        assert_eq!(params.preprocess.max_width, 320);
        assert_eq!(params.preprocess.canny_high, 160.0);
        assert_eq!(params.hough, HoughOptions::default());
    }

    #[test]
    fn scale_never_upscales() {
        let p = PreprocessOptions::default();
        assert_eq!(p.scale_for(320), 1.0);
        assert!((p.scale_for(1280) - 0.5).abs() < 1e-6);
    }
}
