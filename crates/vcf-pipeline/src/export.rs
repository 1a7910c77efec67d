//! vCard export
//!
//! Writes rendered documents to the output directory, either one file
//! per contact or combined multi-entry files. Combined output joins the
//! documents with a blank line and can be split into numbered parts
//! when a size limit is set.

use std::path::{Path, PathBuf};

use vcf_render::Vcard;

use crate::{Error, Result};

/// Create the output directory when it does not exist yet.
///
/// # Errors
///
/// Returns [`Error::Io`] when the directory cannot be created.
pub fn ensure_dir(output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        tracing::info!(dir = %output_dir.display(), "creating output directory");
        std::fs::create_dir_all(output_dir)
            .map_err(|e| Error::io("create_dir", output_dir.display().to_string(), e.to_string()))?;
    }
    Ok(())
}

/// Write one document under its derived filename.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be written.
pub fn write_vcard(output_dir: &Path, vcard: &Vcard) -> Result<PathBuf> {
    let path = output_dir.join(&vcard.filename);
    std::fs::write(&path, &vcard.content)
        .map_err(|e| Error::io("write", path.display().to_string(), e.to_string()))?;
    tracing::info!(file = %path.display(), "created vcard");
    Ok(path)
}

/// Write documents as combined multi-entry files.
///
/// Without a size limit everything lands in one file named `filename`.
/// With a limit the documents are packed greedily; once the next
/// document would push a part over the limit a new part is started, and
/// parts are named by inserting `-1`, `-2`, ... before the `.vcf`
/// suffix. A single document larger than the limit still gets a part of
/// its own.
///
/// # Errors
///
/// Returns [`Error::Io`] when a part cannot be written.
pub fn write_combined(
    output_dir: &Path,
    filename: &str,
    vcards: &[Vcard],
    max_size: Option<u64>,
) -> Result<Vec<PathBuf>> {
    let chunks = pack(vcards, max_size);
    let numbered = chunks.len() > 1;

    let mut written = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let name = if numbered {
            part_name(filename, index + 1)
        } else {
            filename.to_string()
        };
        let path = output_dir.join(&name);
        std::fs::write(&path, chunk)
            .map_err(|e| Error::io("write", path.display().to_string(), e.to_string()))?;
        tracing::info!(file = %path.display(), bytes = chunk.len(), "created combined vcard file");
        written.push(path);
    }
    Ok(written)
}

/// Greedily pack document texts into size-limited chunks. Documents
/// within a chunk are separated by a blank line.
fn pack(vcards: &[Vcard], max_size: Option<u64>) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for vcard in vcards {
        let added = if current.is_empty() {
            vcard.content.len()
        } else {
            vcard.content.len() + 1
        };
        let combined = u64::try_from(current.len() + added).unwrap_or(u64::MAX);
        let over = !current.is_empty() && max_size.is_some_and(|limit| combined > limit);
        if over {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(&vcard.content);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn part_name(filename: &str, part: usize) -> String {
    match filename.strip_suffix(".vcf") {
        Some(stem) => format!("{stem}-{part}.vcf"),
        None => format!("{filename}-{part}"),
    }
}
