//! Source discovery
//!
//! Resolves a source argument into the list of CSV files to convert. A
//! file path stands for itself; a directory is walked recursively for
//! `.csv` files (case-insensitive extension), returned in sorted order
//! so runs are deterministic across filesystems.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Resolve a source path into the CSV files it names.
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] when the path does not exist, and
/// [`Error::Io`] when a directory cannot be read.
pub fn discover_sources(source: &Path) -> Result<Vec<PathBuf>> {
    if source.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }
    if !source.is_dir() {
        return Err(Error::source_not_found(source.display().to_string()));
    }

    let mut files = Vec::new();
    walk(source, &mut files)?;
    files.sort();
    tracing::debug!(root = %source.display(), files = files.len(), "discovered csv sources");
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::io("read_dir", dir.display().to_string(), e.to_string()))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| Error::io("read_dir", dir.display().to_string(), e.to_string()))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if is_csv(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
