//! I/O helpers for the binaries.
//!
//! - `load_image`: decode a PNG/JPEG from disk.
//! - `save_edge_map`: write a binary edge mask as a black/white PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::edges::EdgeMap;
use image::DynamicImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load and decode an image from disk.
pub fn load_image(path: &Path) -> Result<DynamicImage, String> {
    image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))
}

/// Save an edge mask as an 8-bit PNG (edges white).
pub fn save_edge_map(edges: &EdgeMap, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    edges
        .to_gray_image()
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
