//! Document loaders: folders, ZIP/CBZ archives, and single images.

pub mod archive;
pub mod folder;
mod util;

use std::path::Path;

use anyhow::{Context, anyhow};

use crate::codec::probe_dimensions;
use crate::store::PageStore;
use crate::types::{ContentMode, DocumentId};

pub use archive::{list_archive_pages, load_archive};
pub use folder::{list_folder_pages, load_folder};
pub use util::{
    Token, is_hidden, is_supported_image, is_zip_archive, natural_cmp, natural_cmp_path, tokenize,
};

/// Shared result type for fs operations.
pub type Result<T> = crate::Result<T>;

/// A loaded document and the content mode it should open in.
#[derive(Debug)]
pub struct OpenedDocument {
    pub pages: PageStore,
    pub mode: ContentMode,
}

/// Load whatever lives at `path` as a document.
///
/// Folders and ZIP/CBZ archives open as comic books; a lone image opens in single-image mode.
pub fn open_document(path: &Path) -> Result<OpenedDocument> {
    let document = document_id(path);

    if path.is_dir() {
        let pages = load_folder(path, document)?;
        return Ok(OpenedDocument { pages, mode: ContentMode::ComicBook });
    }

    if path.is_file() && is_zip_archive(path) {
        let pages = load_archive(path, document)?;
        return Ok(OpenedDocument { pages, mode: ContentMode::ComicBook });
    }

    if path.is_file() && is_supported_image(path) {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
        let dimensions = probe_dimensions(&bytes);
        let pages = PageStore::with_dimensions(document, [(bytes, dimensions)]);
        return Ok(OpenedDocument { pages, mode: ContentMode::SingleImage });
    }

    Err(anyhow!(
        "unsupported document {}: expected a folder, an image file, or a CBZ/ZIP archive",
        path.display()
    ))
}

fn document_id(path: &Path) -> DocumentId {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    DocumentId::new(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn single_image_opens_in_image_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("poster.png");
        std::fs::write(&path, b"bytes").unwrap();

        let opened = open_document(&path).expect("open");
        assert_eq!(opened.mode, ContentMode::SingleImage);
        assert_eq!(opened.pages.count(), 1);
        assert_eq!(opened.pages.document().as_str(), "poster.png");
    }

    #[test]
    fn folder_opens_as_comic_book() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("1.png"), b"a").unwrap();

        let opened = open_document(dir.path()).expect("open");
        assert_eq!(opened.mode, ContentMode::ComicBook);
        assert_eq!(opened.pages.count(), 1);
    }

    #[test]
    fn unknown_files_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issue.cbr");
        std::fs::write(&path, b"rar").unwrap();

        let err = open_document(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported document"));
    }
}
