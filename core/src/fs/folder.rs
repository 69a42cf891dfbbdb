//! Directory-based documents: every supported image directly inside a folder is a page.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};

use crate::codec::probe_dimensions;
use crate::store::PageStore;
use crate::types::DocumentId;

use super::{Result, util};

/// Read every page of the folder at `root` into a [`PageStore`], in natural order.
pub fn load_folder(root: &Path, document: DocumentId) -> Result<PageStore> {
    let entries = list_folder_pages(root)?;
    let mut payloads = Vec::with_capacity(entries.len());
    for rel_path in entries {
        let path = root.join(&rel_path);
        let bytes = fs::read(&path).with_context(|| format!("reading page {}", path.display()))?;
        let dimensions = probe_dimensions(&bytes);
        payloads.push((bytes, dimensions));
    }

    tracing::debug!(root = %root.display(), pages = payloads.len(), "loaded folder document");
    Ok(PageStore::with_dimensions(document, payloads))
}

/// Relative paths of the folder's page images, hidden files and non-images excluded.
pub fn list_folder_pages(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(anyhow!("folder {} does not exist or is not a directory", root.display()));
    }

    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("listing {}", root.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        if util::is_hidden(&path) || !util::is_supported_image(&path) {
            continue;
        }
        entries.push(path.strip_prefix(root).map(Path::to_path_buf).unwrap_or(path));
    }

    entries.sort_by(|a, b| util::natural_cmp_path(a, b));
    Ok(entries)
}
