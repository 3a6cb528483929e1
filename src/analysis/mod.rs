//! End-to-end analysis pass.
//!
//! Pipeline
//! - Grayscale (provider) → area downscale to `max_width` → `scale`.
//! - Subject estimate on the un-blurred small image.
//! - Blur → Canny → one line-detection call shared by horizon and leading.
//! - Thirds / phi from the trusted subject and horizon.
//! - Spiral, symmetry and diagonal read the edge map in parallel (`rayon::join`).
//!
//! Insufficient signal never fails a pass; only provider errors on the edge
//! or line stages (and invalid input buffers) surface as [`AnalysisError`].
//!
//! [`AnalysisError`]: crate::error::AnalysisError

pub mod params;
mod pipeline;
mod report;

pub use params::{AnalyzerParams, PreprocessOptions};
pub use pipeline::CompositionAnalyzer;
pub use report::{AnalysisReport, Features};
