use super::read_json;
use crate::analysis::AnalyzerParams;
use crate::scoring::{DEFAULT_TOP_COUNT, DEFAULT_TOP_MIN_SCORE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config of the `composition-coach` binary.
///
/// ```json
/// {
///   "input": "photos/harbour.jpg",
///   "params": { "leading": { "seed": 42 } },
///   "top": { "min_score": 60 },
///   "output": { "report_json": "out/harbour.json", "edges_png": "out/harbour_edges.png" }
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct AnalyzeConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: AnalyzerParams,
    #[serde(default)]
    pub top: TopMatchesConfig,
    pub output: AnalyzeOutputConfig,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct TopMatchesConfig {
    pub min_score: u8,
    pub max: usize,
}

impl Default for TopMatchesConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_TOP_MIN_SCORE,
            max: DEFAULT_TOP_COUNT,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AnalyzeOutputConfig {
    pub report_json: PathBuf,
    /// Optional dump of the working-resolution edge map.
    #[serde(default)]
    pub edges_png: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<AnalyzeConfig, String> {
    read_json(path)
}
