//! Vision-primitives seam.
//!
//! The analyzers never touch pixels through anything but this trait (plus
//! direct reads of the [`EdgeMap`]), so a host can swap in an accelerated
//! provider. [`NativePrimitives`] is the pure-Rust default built from the
//! crate's `edges`, `filters` and `hough` modules, with Canny delegated to
//! `imageproc`.
//!
//! Every operation returns `Result`: a provider failure is reported as
//! [`AnalysisError::Primitive`] and handled by the caller (the subject
//! estimator falls back to its sentinel; everything else propagates).
use crate::edges::{self, EdgeMap};
use crate::error::AnalysisError;
use crate::filters::{self, MaxLocation, StaticSeparableFilter};
use crate::hough::{self, HoughOptions};
use crate::image::{GrayImageU8, ImageF32};
use crate::types::LineSegment;
use image::DynamicImage;

pub trait VisionPrimitives {
    /// Luma conversion of a decoded color image.
    fn grayscale(&self, image: &DynamicImage) -> Result<GrayImageU8, AnalysisError>;

    /// Gaussian blur with a square aperture (1 is a no-op).
    fn gaussian_blur(&self, image: &ImageF32, ksize: usize) -> Result<ImageF32, AnalysisError>;

    /// Binary edges from a (blurred) grayscale image. Thresholds apply to the
    /// gradient magnitude of the 8-bit image; `aperture` is the derivative
    /// kernel size.
    fn canny(
        &self,
        image: &ImageF32,
        low: f32,
        high: f32,
        aperture: usize,
    ) -> Result<EdgeMap, AnalysisError>;

    /// Line segments supported by the edge mask.
    fn detect_lines(
        &self,
        edges: &EdgeMap,
        opts: &HoughOptions,
    ) -> Result<Vec<LineSegment>, AnalysisError>;

    /// Area-averaging resize.
    fn resize_area(&self, image: &ImageF32, w: usize, h: usize) -> Result<ImageF32, AnalysisError>;

    /// Area-averaging resize of a binary mask (cells with any edge stay set).
    fn resize_mask(&self, mask: &EdgeMap, w: usize, h: usize) -> Result<EdgeMap, AnalysisError>;

    fn flip_horizontal(&self, mask: &EdgeMap) -> Result<EdgeMap, AnalysisError>;

    /// Gradient magnitude `sqrt(dx^2 + dy^2)` of the first derivatives.
    fn gradient_magnitude(&self, image: &ImageF32) -> Result<ImageF32, AnalysisError>;

    fn max_location(&self, image: &ImageF32) -> Result<MaxLocation, AnalysisError>;

    fn mean(&self, image: &ImageF32) -> Result<f32, AnalysisError>;

    fn bitwise_and(&self, a: &EdgeMap, b: &EdgeMap) -> Result<EdgeMap, AnalysisError>;

    fn bitwise_or(&self, a: &EdgeMap, b: &EdgeMap) -> Result<EdgeMap, AnalysisError>;

    fn count_nonzero(&self, mask: &EdgeMap) -> Result<usize, AnalysisError>;
}

/// Pure-Rust provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativePrimitives;

impl VisionPrimitives for NativePrimitives {
    fn grayscale(&self, image: &DynamicImage) -> Result<GrayImageU8, AnalysisError> {
        let luma = image.to_luma8();
        let (w, h) = (luma.width() as usize, luma.height() as usize);
        if w == 0 || h == 0 {
            return Err(AnalysisError::EmptyImage);
        }
        GrayImageU8::new(w, h, luma.into_raw())
    }

    fn gaussian_blur(&self, image: &ImageF32, ksize: usize) -> Result<ImageF32, AnalysisError> {
        if ksize == 1 {
            return Ok(image.clone());
        }
        let filter = StaticSeparableFilter::gaussian(ksize).ok_or_else(|| {
            AnalysisError::primitive(
                "gaussian_blur",
                format!("unsupported aperture {ksize}, expected 1, 3 or 5"),
            )
        })?;
        Ok(filters::blur_separable(image, &filter))
    }

    fn canny(
        &self,
        image: &ImageF32,
        low: f32,
        high: f32,
        aperture: usize,
    ) -> Result<EdgeMap, AnalysisError> {
        if aperture != 3 {
            return Err(AnalysisError::primitive(
                "canny",
                format!("unsupported aperture {aperture}, only the 3x3 Sobel is available"),
            ));
        }
        if !(low.is_finite() && high.is_finite() && low > 0.0 && high > 0.0) {
            return Err(AnalysisError::primitive(
                "canny",
                format!("thresholds must be positive, got {low}/{high}"),
            ));
        }
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if image.w < 3 || image.h < 3 {
            return Ok(EdgeMap::new(image.w, image.h));
        }
        let edges = imageproc::edges::canny(&image.to_gray_image(), low, high);
        Ok(EdgeMap::from_gray_image(&edges))
    }

    fn detect_lines(
        &self,
        edges: &EdgeMap,
        opts: &HoughOptions,
    ) -> Result<Vec<LineSegment>, AnalysisError> {
        Ok(hough::detect_segments(edges, opts))
    }

    fn resize_area(&self, image: &ImageF32, w: usize, h: usize) -> Result<ImageF32, AnalysisError> {
        Ok(filters::resize_area(image, w, h))
    }

    fn resize_mask(&self, mask: &EdgeMap, w: usize, h: usize) -> Result<EdgeMap, AnalysisError> {
        Ok(filters::resize_mask_area(mask, w, h))
    }

    fn flip_horizontal(&self, mask: &EdgeMap) -> Result<EdgeMap, AnalysisError> {
        Ok(mask.flip_horizontal())
    }

    fn gradient_magnitude(&self, image: &ImageF32) -> Result<ImageF32, AnalysisError> {
        Ok(edges::image_gradients(image).mag)
    }

    fn max_location(&self, image: &ImageF32) -> Result<MaxLocation, AnalysisError> {
        filters::max_location(image)
            .ok_or_else(|| AnalysisError::primitive("max_location", "empty image"))
    }

    fn mean(&self, image: &ImageF32) -> Result<f32, AnalysisError> {
        Ok(filters::mean(image))
    }

    fn bitwise_and(&self, a: &EdgeMap, b: &EdgeMap) -> Result<EdgeMap, AnalysisError> {
        a.and(b)
    }

    fn bitwise_or(&self, a: &EdgeMap, b: &EdgeMap) -> Result<EdgeMap, AnalysisError> {
        a.or(b)
    }

    fn count_nonzero(&self, mask: &EdgeMap) -> Result<usize, AnalysisError> {
        Ok(mask.count_nonzero())
    }
}
