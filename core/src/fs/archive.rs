//! ZIP/CBZ archive documents.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use zip::read::ZipArchive;

use crate::codec::probe_dimensions;
use crate::store::PageStore;
use crate::types::DocumentId;

use super::{Result, util};

/// Largest single page accepted from an archive, declared or actual.
pub const MAX_PAGE_BYTES: u64 = 256 * 1024 * 1024;

/// Read every image entry of the archive at `path` into a [`PageStore`], in natural order.
pub fn load_archive(path: &Path, document: DocumentId) -> Result<PageStore> {
    let mut archive = open(path)?;
    let entries = collect_entries(&mut archive)?;

    let mut payloads = Vec::with_capacity(entries.len());
    for (index, rel_path) in entries {
        let file = archive.by_index(index).map_err(|err| anyhow!("{err}"))?;
        let declared = file.size();
        if declared > MAX_PAGE_BYTES {
            bail!(
                "entry {} in {} declares {declared} bytes, over the page limit",
                rel_path.display(),
                path.display()
            );
        }

        let mut bytes = Vec::with_capacity(usize::try_from(declared).unwrap_or(0));
        file.take(MAX_PAGE_BYTES + 1)
            .read_to_end(&mut bytes)
            .with_context(|| format!("extracting {} from {}", rel_path.display(), path.display()))?;
        if bytes.len() as u64 > MAX_PAGE_BYTES {
            bail!("entry {} in {} exceeds the page limit", rel_path.display(), path.display());
        }
        let dimensions = probe_dimensions(&bytes);
        payloads.push((bytes, dimensions));
    }

    tracing::debug!(archive = %path.display(), pages = payloads.len(), "loaded archive document");
    Ok(PageStore::with_dimensions(document, payloads))
}

/// Sanitised entry names of the archive's page images, in reading order.
pub fn list_archive_pages(path: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = open(path)?;
    Ok(collect_entries(&mut archive)?.into_iter().map(|(_, rel_path)| rel_path).collect())
}

fn open(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).with_context(|| format!("opening archive {}", path.display()))?;
    ZipArchive::new(file).map_err(|err| anyhow!("reading archive {}: {err}", path.display()))
}

fn collect_entries(archive: &mut ZipArchive<File>) -> Result<Vec<(usize, PathBuf)>> {
    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let file = archive.by_index(index).map_err(|err| anyhow!("{err}"))?;
        if file.is_dir() {
            continue;
        }

        let Some(sanitized) = file.enclosed_name().and_then(util::sanitize_zip_path) else {
            continue;
        };
        if util::is_hidden(&sanitized) || !util::is_supported_image(&sanitized) {
            continue;
        }
        entries.push((index, sanitized));
    }

    entries.sort_by(|(_, a), (_, b)| util::natural_cmp_path(a, b));
    Ok(entries)
}
