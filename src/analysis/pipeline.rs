use super::params::AnalyzerParams;
use super::report::{AnalysisReport, Features};
use crate::analyzers::{
    estimate_subject, horizon_from_segments, leading_from_segments, score_diagonal, score_phi,
    score_spiral, score_symmetry, score_thirds,
};
use crate::diagnostics::{elapsed_ms, StageTiming, TimingBreakdown};
use crate::edges::EdgeMap;
use crate::error::AnalysisError;
use crate::image::{ImageF32, ImageU8};
use crate::primitives::{NativePrimitives, VisionPrimitives};
use crate::types::{AnalysisBundle, FrameSize};
use image::DynamicImage;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// The analysis boundary: one image in, one [`AnalysisReport`] out.
///
/// Stateless between calls; the same analyzer can serve any number of
/// frames, from any number of threads when `P: Sync`.
#[derive(Clone, Debug)]
pub struct CompositionAnalyzer<P = NativePrimitives> {
    params: AnalyzerParams,
    prims: P,
}

impl CompositionAnalyzer<NativePrimitives> {
    pub fn new(params: AnalyzerParams) -> Self {
        Self::with_primitives(params, NativePrimitives)
    }
}

impl Default for CompositionAnalyzer<NativePrimitives> {
    fn default() -> Self {
        Self::new(AnalyzerParams::default())
    }
}

impl<P: VisionPrimitives + Sync> CompositionAnalyzer<P> {
    /// Analyzer backed by a host-supplied primitives provider.
    pub fn with_primitives(params: AnalyzerParams, prims: P) -> Self {
        Self { params, prims }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    pub fn primitives(&self) -> &P {
        &self.prims
    }

    /// Analyze a decoded color image.
    pub fn analyze_image(&self, image: &DynamicImage) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_image_with_features(image)
            .map(|(report, _)| report)
    }

    /// Like [`analyze_image`](Self::analyze_image), also handing back the
    /// working-resolution features the pass ran on (e.g. to dump the edge map).
    pub fn analyze_image_with_features(
        &self,
        image: &DynamicImage,
    ) -> Result<(AnalysisReport, Features), AnalysisError> {
        let start = Instant::now();
        let gray = self.prims.grayscale(image)?;
        let gray_ms = elapsed_ms(start);
        let mut rng = self.make_rng();
        let (mut report, features) = self.analyze_gray_features(gray.as_view(), &mut rng)?;
        report
            .timings
            .stages
            .insert(0, StageTiming::new("grayscale", gray_ms));
        report.timings.total_ms += gray_ms;
        Ok((report, features))
    }

    /// Analyze a full-resolution grayscale view. The leading-lines sampler is
    /// seeded from `params.leading.seed` or OS entropy.
    pub fn analyze_gray(&self, gray: ImageU8<'_>) -> Result<AnalysisReport, AnalysisError> {
        let mut rng = self.make_rng();
        self.analyze_gray_with_rng(gray, &mut rng)
    }

    pub fn analyze_gray_with_rng<R: Rng + ?Sized>(
        &self,
        gray: ImageU8<'_>,
        rng: &mut R,
    ) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_gray_features(gray, rng)
            .map(|(report, _)| report)
    }

    fn analyze_gray_features<R: Rng + ?Sized>(
        &self,
        gray: ImageU8<'_>,
        rng: &mut R,
    ) -> Result<(AnalysisReport, Features), AnalysisError> {
        let start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let features = self.extract_features_timed(gray, &mut timings)?;
        let mut report =
            self.run_analyzers(&features.gray, &features.edges, features.scale, rng, timings)?;
        report.timings.total_ms = elapsed_ms(start);
        Ok((report, features))
    }

    /// Downscale, blur and edge-detect a full-resolution grayscale view.
    pub fn extract_features(&self, gray: ImageU8<'_>) -> Result<Features, AnalysisError> {
        self.extract_features_timed(gray, &mut TimingBreakdown::default())
    }

    /// Analyze already-extracted working-resolution features.
    pub fn analyze_features(
        &self,
        gray: &ImageF32,
        edges: &EdgeMap,
        scale: f32,
    ) -> Result<AnalysisReport, AnalysisError> {
        let mut rng = self.make_rng();
        self.analyze_features_with_rng(gray, edges, scale, &mut rng)
    }

    pub fn analyze_features_with_rng<R: Rng + ?Sized>(
        &self,
        gray: &ImageF32,
        edges: &EdgeMap,
        scale: f32,
        rng: &mut R,
    ) -> Result<AnalysisReport, AnalysisError> {
        if (gray.w, gray.h) != (edges.width(), edges.height()) {
            return Err(AnalysisError::SizeMismatch {
                left: (gray.w, gray.h),
                right: (edges.width(), edges.height()),
            });
        }
        let start = Instant::now();
        let mut report = self.run_analyzers(gray, edges, scale, rng, TimingBreakdown::default())?;
        report.timings.total_ms = elapsed_ms(start);
        Ok(report)
    }

    fn make_rng(&self) -> StdRng {
        match self.params.leading.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn extract_features_timed(
        &self,
        gray: ImageU8<'_>,
        timings: &mut TimingBreakdown,
    ) -> Result<Features, AnalysisError> {
        gray.validate()?;
        let pre = &self.params.preprocess;

        let stage = Instant::now();
        let full = ImageF32::from_u8(&gray);
        let scale = pre.scale_for(gray.w);
        let sw = ((gray.w as f32 * scale).round() as usize).max(1);
        let sh = ((gray.h as f32 * scale).round() as usize).max(1);
        let small = if (sw, sh) == (gray.w, gray.h) {
            full
        } else {
            self.prims.resize_area(&full, sw, sh)?
        };
        timings.push("downscale", elapsed_ms(stage));

        let stage = Instant::now();
        let blurred = self.prims.gaussian_blur(&small, pre.blur_ksize)?;
        let edges = self
            .prims
            .canny(&blurred, pre.canny_low, pre.canny_high, pre.canny_aperture)?;
        timings.push("edges", elapsed_ms(stage));
        debug!(
            "features: {}x{} -> {sw}x{sh} (scale {scale:.3}), {} edge pixels",
            gray.w,
            gray.h,
            edges.count_nonzero()
        );

        Ok(Features {
            gray: small,
            edges,
            scale,
        })
    }

    fn run_analyzers<R: Rng + ?Sized>(
        &self,
        gray: &ImageF32,
        edges: &EdgeMap,
        scale: f32,
        rng: &mut R,
        mut timings: TimingBreakdown,
    ) -> Result<AnalysisReport, AnalysisError> {
        let p = &self.params;
        let frame = FrameSize {
            width: edges.width(),
            height: edges.height(),
        };
        if frame.width == 0 || frame.height == 0 {
            return Err(AnalysisError::EmptyImage);
        }

        let subject = timings.time("subject", || {
            estimate_subject(&self.prims, gray, &p.subject)
        });

        let stage = Instant::now();
        let segments = self.prims.detect_lines(edges, &p.hough)?;
        timings.push("lines", elapsed_ms(stage));

        let stage = Instant::now();
        let horizon = horizon_from_segments(&segments, frame, &p.horizon);
        let leading = leading_from_segments(&segments, &p.leading, rng);
        timings.push("horizon+leading", elapsed_ms(stage));

        let trusted_subject = subject.trusted_center();
        let trusted_horizon = horizon.trusted_y();
        let thirds = score_thirds(trusted_subject, trusted_horizon, &p.grid);
        let phi = score_phi(trusted_subject, trusted_horizon, &p.grid);

        let stage = Instant::now();
        let (spiral, (symmetry, diagonal)) = rayon::join(
            || score_spiral(edges, trusted_subject, &p.spiral),
            || {
                rayon::join(
                    || score_symmetry(&self.prims, edges, &p.symmetry),
                    || score_diagonal(edges, &p.diagonal),
                )
            },
        );
        let symmetry = symmetry?;
        timings.push("structure", elapsed_ms(stage));

        let bundle = AnalysisBundle {
            scale,
            frame,
            subject,
            horizon,
            thirds,
            phi,
            spiral,
            symmetry,
            diagonal,
            leading,
        };
        Ok(AnalysisReport {
            bundle,
            segment_count: segments.len(),
            timings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_features_are_rejected() {
        let analyzer = CompositionAnalyzer::default();
        let err = analyzer
            .analyze_features(&ImageF32::new(10, 10), &EdgeMap::new(12, 10), 1.0)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::SizeMismatch { .. }));
    }

    #[test]
    fn wide_input_is_downscaled_to_working_width() {
        let data = vec![128u8; 1280 * 200];
        let gray = ImageU8 {
            w: 1280,
            h: 200,
            stride: 1280,
            data: &data,
        };
        let features = CompositionAnalyzer::default()
            .extract_features(gray)
            .expect("valid input");
        assert_eq!((features.gray.w, features.gray.h), (640, 100));
        assert!((features.scale - 0.5).abs() < 1e-6);
        assert_eq!(features.edges.count_nonzero(), 0);
    }

    #[test]
    fn image_pass_returns_the_features_it_analyzed() {
        let mut rgb = image::RgbImage::from_pixel(320, 240, image::Rgb([40, 40, 40]));
        for y in 120..240 {
            for x in 0..320 {
                rgb.put_pixel(x, y, image::Rgb([200, 200, 200]));
            }
        }
        let (report, features) = CompositionAnalyzer::default()
            .analyze_image_with_features(&DynamicImage::ImageRgb8(rgb))
            .expect("valid input");
        assert_eq!(
            (features.edges.width(), features.edges.height()),
            (report.bundle.frame.width, report.bundle.frame.height)
        );
        assert!(features.edges.count_nonzero() > 0);
        assert_eq!(report.timings.stages[0].label, "grayscale");
    }

    #[test]
    fn truncated_buffer_is_an_error() {
        let data = vec![0u8; 10];
        let gray = ImageU8 {
            w: 4,
            h: 4,
            stride: 4,
            data: &data,
        };
        assert!(CompositionAnalyzer::default().analyze_gray(gray).is_err());
    }
}
