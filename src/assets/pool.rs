use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::SlotweaveResult;

/// File extensions accepted as raster inputs (checked case-insensitively).
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Recursively collect the image files under `dir`, sorted by path for a
/// stable pool ordering across runs and platforms.
///
/// A missing directory is an error; an existing but empty directory yields an
/// empty pool.
pub fn list_image_files(dir: &Path) -> SlotweaveResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_image_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_image_files(dir: &Path, out: &mut Vec<PathBuf>) -> SlotweaveResult<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_image_files(&path, out)?;
        } else if has_image_extension(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/pool.rs"]
mod tests;
