use super::read_json;
use crate::analysis::PreprocessOptions;
use crate::hough::HoughOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config of the `edge_lines` binary: extraction only, no analyzers.
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeLinesConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub preprocess: PreprocessOptions,
    #[serde(default)]
    pub hough: HoughOptions,
    pub output: EdgeLinesOutputConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EdgeLinesOutputConfig {
    pub edges_png: PathBuf,
    pub segments_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<EdgeLinesConfig, String> {
    read_json(path)
}
