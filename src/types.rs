//! Shared data model for one analysis pass.
//!
//! Every geometric quantity lives in one of two spaces:
//! - normalized: both axes in `[0, 1]`, origin top-left ([`NormalizedPoint`]);
//! - small-pixel: pixel coordinates in the downscaled working image
//!   ([`PixelPoint`], [`LineSegment`]). `small = original * scale`, so a
//!   consumer maps back to full resolution by multiplying with `1 / scale`.
//!
//! All `[0, 1]` scores are clamped by the analyzer that produces them.
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Point in normalized frame space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Point in small-pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Map to full-resolution pixels of the original image.
    pub fn to_original(&self, scale: f32) -> Self {
        let inv = 1.0 / scale.max(f32::EPSILON);
        Self::new(self.x * inv, self.y * inv)
    }
}

/// Line segment with small-pixel endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl LineSegment {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    #[inline]
    pub fn midpoint_y(&self) -> f32 {
        0.5 * (self.y1 + self.y2)
    }

    /// `|sin|` of the segment angle: 0 for horizontal, 1 for vertical.
    #[inline]
    pub fn abs_sin(&self) -> f32 {
        let len = self.length();
        if len <= f32::EPSILON {
            return 0.0;
        }
        ((self.y2 - self.y1) / len).abs()
    }

    /// Implicit line `ax + by + c = 0` with unit normal, so `|a x + b y + c|`
    /// is the pixel distance of `(x, y)` to the line. `None` for degenerate
    /// (zero-length) segments.
    pub fn normal_form(&self) -> Option<Vector3<f32>> {
        let a = self.y1 - self.y2;
        let b = self.x2 - self.x1;
        let c = self.x1 * self.y2 - self.x2 * self.y1;
        let n = a.hypot(b);
        if n < 1e-6 {
            return None;
        }
        Some(Vector3::new(a / n, b / n, c / n))
    }

    /// Map to full-resolution pixels of the original image.
    pub fn to_original(&self, scale: f32) -> Self {
        let inv = 1.0 / scale.max(f32::EPSILON);
        Self::new(self.x1 * inv, self.y1 * inv, self.x2 * inv, self.y2 * inv)
    }
}

/// Saliency-based subject location.
///
/// `confidence == 0` means "no reliable subject": consumers must check the
/// confidence (see [`SubjectEstimate::trusted_center`]) rather than assume the
/// center is meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubjectEstimate {
    pub center: NormalizedPoint,
    pub confidence: f32,
}

impl SubjectEstimate {
    /// Fail-soft value: frame center with zero confidence.
    pub const fn sentinel() -> Self {
        Self {
            center: NormalizedPoint::CENTER,
            confidence: 0.0,
        }
    }

    pub fn trusted_center(&self) -> Option<NormalizedPoint> {
        (self.confidence > 0.0).then_some(self.center)
    }
}

/// Horizon height in normalized space. `y = 0.5, confidence = 0` is "no horizon".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HorizonEstimate {
    pub y: f32,
    pub confidence: f32,
}

impl HorizonEstimate {
    pub const fn none() -> Self {
        Self {
            y: 0.5,
            confidence: 0.0,
        }
    }

    pub fn trusted_y(&self) -> Option<f32> {
        (self.confidence > 0.0).then_some(self.y)
    }
}

/// Shared result shape of the thirds and phi grid scorers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridScoreResult {
    pub subject_score: f32,
    pub horizon_score: f32,
    pub overall: f32,
    /// Nearest target point to the subject, when a subject was scored.
    pub best_target: Option<NormalizedPoint>,
}

impl GridScoreResult {
    pub const fn zero() -> Self {
        Self {
            subject_score: 0.0,
            horizon_score: 0.0,
            overall: 0.0,
            best_target: None,
        }
    }
}

/// The four ways a golden spiral can be anchored in a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpiralOrientation {
    Identity,
    MirrorX,
    MirrorY,
    MirrorXY,
}

impl SpiralOrientation {
    pub const ALL: [Self; 4] = [Self::Identity, Self::MirrorX, Self::MirrorY, Self::MirrorXY];

    #[inline]
    pub fn mirrors_x(self) -> bool {
        matches!(self, Self::MirrorX | Self::MirrorXY)
    }

    #[inline]
    pub fn mirrors_y(self) -> bool {
        matches!(self, Self::MirrorY | Self::MirrorXY)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpiralResult {
    pub score: f32,
    pub orientation: SpiralOrientation,
    /// Tightest point of the winning spiral; `None` when nothing scored.
    pub eye: Option<NormalizedPoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryResult {
    /// Intersection-over-union of the edge map and its mirror.
    pub score: f32,
    /// Winning vertical axis, normalized.
    pub axis_x: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagonalDirection {
    #[serde(rename = "TLBR")]
    TopLeftToBottomRight,
    #[serde(rename = "TRBL")]
    TopRightToBottomLeft,
}

impl DiagonalDirection {
    pub fn short_name(self) -> &'static str {
        match self {
            Self::TopLeftToBottomRight => "TLBR",
            Self::TopRightToBottomLeft => "TRBL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagonalResult {
    /// Edge density inside the band around the best diagonal.
    pub score: f32,
    pub best: DiagonalDirection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadingResult {
    /// Inlier fraction of the best vanishing-point hypothesis.
    pub convergence: f32,
    /// Vanishing point in small-pixel space.
    pub vanishing_point: Option<PixelPoint>,
    /// Longest candidate segments (small-pixel), longest first, for display.
    pub kept_segments: Vec<LineSegment>,
}

impl LeadingResult {
    pub fn none() -> Self {
        Self {
            convergence: 0.0,
            vanishing_point: None,
            kept_segments: Vec::new(),
        }
    }

    /// Copy with the vanishing point and segments in full-resolution pixels.
    pub fn to_original(&self, scale: f32) -> Self {
        Self {
            convergence: self.convergence,
            vanishing_point: self.vanishing_point.map(|p| p.to_original(scale)),
            kept_segments: self
                .kept_segments
                .iter()
                .map(|s| s.to_original(scale))
                .collect(),
        }
    }
}

/// Size of the small-pixel working frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: usize,
    pub height: usize,
}

/// Aggregate output of one analysis pass. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBundle {
    /// `small = original * scale`.
    pub scale: f32,
    pub frame: FrameSize,
    pub subject: SubjectEstimate,
    pub horizon: HorizonEstimate,
    pub thirds: GridScoreResult,
    pub phi: GridScoreResult,
    pub spiral: SpiralResult,
    pub symmetry: SymmetryResult,
    pub diagonal: DiagonalResult,
    pub leading: LeadingResult,
}

impl AnalysisBundle {
    /// Vanishing point mapped into normalized frame space, if one was found.
    pub fn vanishing_point_normalized(&self) -> Option<NormalizedPoint> {
        let vp = self.leading.vanishing_point?;
        if self.frame.width == 0 || self.frame.height == 0 {
            return None;
        }
        Some(NormalizedPoint::new(
            vp.x / self.frame.width as f32,
            vp.y / self.frame.height as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_form_gives_pixel_distance() {
        let seg = LineSegment::new(10.0, 0.0, 10.0, 50.0);
        let line = seg.normal_form().expect("non-degenerate");
        let d = (line.x * 13.0 + line.y * 20.0 + line.z).abs();
        assert!((d - 3.0).abs() < 1e-5, "distance {d}");
    }

    #[test]
    fn degenerate_segment_has_no_normal_form() {
        assert!(LineSegment::new(4.0, 4.0, 4.0, 4.0).normal_form().is_none());
        assert_eq!(LineSegment::new(4.0, 4.0, 4.0, 4.0).abs_sin(), 0.0);
    }

    #[test]
    fn sentinels_are_untrusted() {
        assert!(SubjectEstimate::sentinel().trusted_center().is_none());
        assert!(HorizonEstimate::none().trusted_y().is_none());
    }

    #[test]
    fn segments_scale_back_to_original() {
        let seg = LineSegment::new(10.0, 20.0, 30.0, 40.0).to_original(0.5);
        assert_eq!(seg, LineSegment::new(20.0, 40.0, 60.0, 80.0));

        let leading = LeadingResult {
            convergence: 0.5,
            vanishing_point: Some(PixelPoint::new(100.0, 25.0)),
            kept_segments: vec![LineSegment::new(0.0, 0.0, 10.0, 10.0)],
        }
        .to_original(0.25);
        assert_eq!(leading.vanishing_point, Some(PixelPoint::new(400.0, 100.0)));
        assert_eq!(leading.kept_segments[0].x2, 40.0);
        assert_eq!(leading.convergence, 0.5);
    }

    #[test]
    fn vanishing_point_normalizes_by_frame() {
        let mut leading = LeadingResult::none();
        leading.vanishing_point = Some(PixelPoint::new(160.0, 60.0));
        let bundle = AnalysisBundle {
            scale: 0.5,
            frame: FrameSize {
                width: 320,
                height: 240,
            },
            subject: SubjectEstimate::sentinel(),
            horizon: HorizonEstimate::none(),
            thirds: GridScoreResult::zero(),
            phi: GridScoreResult::zero(),
            spiral: SpiralResult {
                score: 0.0,
                orientation: SpiralOrientation::Identity,
                eye: None,
            },
            symmetry: SymmetryResult {
                score: 0.0,
                axis_x: 0.5,
            },
            diagonal: DiagonalResult {
                score: 0.0,
                best: DiagonalDirection::TopLeftToBottomRight,
            },
            leading,
        };
        assert_eq!(
            bundle.vanishing_point_normalized(),
            Some(NormalizedPoint::new(0.5, 0.25))
        );
    }
}
