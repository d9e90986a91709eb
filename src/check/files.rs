//! File collection for a check run.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::language::Language;

/// Directories never descended into.
pub const SKIPPED_DIRS: &[&str] = &["vendor", "node_modules", "target", "dist", "build", "__pycache__"];

/// Collect the files under `root` in a supported language, sorted by path.
///
/// A `root` that is itself a file is returned as-is.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if !config.include_hidden && name.starts_with('.') {
                return false;
            }
            !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if Language::from_path(path).is_none() {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.is_path_excluded(relative) {
            tracing::debug!(path = %relative.display(), "excluded by config");
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
