//! JSON runtime configuration for the command-line tools.
//!
//! Every tool takes a single `<config.json>` argument. Paths are resolved
//! relative to the working directory; analyzer knobs default to
//! [`AnalyzerParams::default`](crate::analysis::AnalyzerParams) and only the
//! fields present in the file override them.
pub mod analyze;
pub mod edge_lines;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
