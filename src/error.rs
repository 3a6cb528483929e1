use thiserror::Error;

/// Failures that abort an analysis pass.
///
/// Weak or missing structure (no lines, empty masks, flat images) is never an
/// error; analyzers resolve it to zero-confidence results instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("image has zero width or height")]
    EmptyImage,
    #[error("buffer of {len} bytes does not describe a {w}x{h} image")]
    InvalidDimensions { w: usize, h: usize, len: usize },
    #[error("image sizes differ: {left:?} vs {right:?}")]
    SizeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("vision primitive `{op}` failed: {reason}")]
    Primitive { op: &'static str, reason: String },
}

impl AnalysisError {
    pub fn primitive(op: &'static str, reason: impl Into<String>) -> Self {
        Self::Primitive {
            op,
            reason: reason.into(),
        }
    }
}
