use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{OptimizeError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the image files directly inside `directory`.
///
/// Regular files only; subdirectories and symlinks are skipped. Entries come
/// back in whatever order the underlying directory listing produces.
pub fn select_images(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.exists() {
        return Err(OptimizeError::FileNotFound(directory.to_path_buf()));
    }

    let mut image_files = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && is_image_file(entry.path()) {
            image_files.push(entry.path().to_path_buf());
        }
    }

    Ok(image_files)
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
