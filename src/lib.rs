#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analysis;
pub mod coach;
pub mod error;
pub mod image;
pub mod scoring;
pub mod session;
pub mod types;

// Building blocks: the rule analyzers and the native vision primitives.
pub mod analyzers;
pub mod diagnostics;
pub mod edges;
pub mod filters;
pub mod hough;
pub mod primitives;

// Runtime configuration for the binaries.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::analysis::{AnalysisReport, AnalyzerParams, CompositionAnalyzer};
pub use crate::coach::{suggest, Nudge, Suggestion};
pub use crate::error::AnalysisError;
pub use crate::primitives::{NativePrimitives, VisionPrimitives};
pub use crate::scoring::{compute_rule_scores, top_matches, RuleKey, RuleScore};
pub use crate::types::AnalysisBundle;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use composition_coach::prelude::*;
///
/// # fn main() -> Result<(), AnalysisError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let report = CompositionAnalyzer::default().analyze_gray(img)?;
/// for s in suggest(&report.bundle) {
///     println!("{} (priority {:.1})", s.message, s.priority);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{
        compute_rule_scores, suggest, AnalysisBundle, AnalysisError, AnalyzerParams,
        CompositionAnalyzer,
    };
}
