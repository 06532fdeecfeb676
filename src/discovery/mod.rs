//! Resource discovery.
//!
//! A conversion run points at one working directory; every `*.res` file
//! at its top level is a manifest. Subdirectories are not searched, so
//! image assets can live in nested folders without being mistaken for
//! manifests.

pub mod manifest;

pub use manifest::{parse_line, parse_manifest, Record, DEFAULT_SPRITE_ITERATION};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, TileError};

/// Find the manifests in `dir`, sorted for a stable processing order.
pub fn find_manifests(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(TileError::Io {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "res"))
        .collect();
    found.sort();
    Ok(found)
}
