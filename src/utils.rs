// ABOUTME: Path helpers for the html2pptx application
// ABOUTME: Absolute path resolution, directory validation and output directory creation

use crate::errors::{Html2PptxError, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Resolve a path against the current working directory without touching
/// the filesystem, so paths that do not exist yet can still be made absolute.
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(Html2PptxError::FileError)?;
    Ok(cwd.join(path))
}

/// Validate that a directory exists
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Html2PptxError::InputDirectoryNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        debug!("Creating directory {:?}", path);
        std::fs::create_dir_all(path).map_err(Html2PptxError::FileError)?;
    } else if !path.is_dir() {
        return Err(Html2PptxError::Serialization(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}
