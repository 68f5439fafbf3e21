// ABOUTME: Input resolution for the html2pptx application
// ABOUTME: Turns a directory or an explicit file list into an ordered list of absolute paths

use crate::config::InputSources;
use crate::errors::{Html2PptxError, Result};
use crate::utils;
use glob::MatchOptions;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// File pattern matched inside an input directory
pub const HTML_PATTERN: &str = "*.html";

/// Ordered, non-empty list of absolute HTML paths. Slide order follows this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs(Vec<PathBuf>);

impl ResolvedInputs {
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }
}

/// Resolve the caller's input sources.
///
/// The explicit list is trimmed and emptied of blank entries before the
/// conflict check, so `--html ""` next to a directory leaves the directory
/// as the only source. An empty directory value counts as no directory.
pub fn resolve_inputs(sources: &InputSources) -> Result<ResolvedInputs> {
    let explicit = explicit_entries(&sources.html_files);
    let html_dir = sources
        .html_dir
        .as_deref()
        .filter(|dir| !dir.as_os_str().is_empty());

    if html_dir.is_some() && !explicit.is_empty() {
        return Err(Html2PptxError::ConflictingInputSources);
    }

    let paths = match html_dir {
        Some(dir) => list_html_files(dir)?,
        None => explicit
            .iter()
            .map(|entry| utils::get_absolute_path(Path::new(entry)))
            .collect::<Result<Vec<_>>>()?,
    };

    if paths.is_empty() {
        return Err(Html2PptxError::NoInputs);
    }

    info!("Resolved {} HTML input(s)", paths.len());
    for path in &paths {
        debug!("Input: {:?}", path);
    }
    Ok(ResolvedInputs(paths))
}

fn explicit_entries(raw: &[String]) -> Vec<&str> {
    raw.iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// List `*.html` files directly inside `dir` (non-recursive), sorted by absolute path.
/// Dotfiles are skipped.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    utils::validate_directory_exists(dir)?;
    let dir = utils::get_absolute_path(dir)?;

    let glob_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        HTML_PATTERN
    );
    debug!("Listing inputs with pattern {}", glob_pattern);

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let mut paths: Vec<PathBuf> = glob::glob_with(&glob_pattern, options)
        .map_err(|_| Html2PptxError::InputDirectoryNotFound(dir.clone()))?
        .flatten()
        .filter(|path| path.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}
