//! Ordered, randomly indexable page payloads.
//!
//! Payloads are the raw encoded image bytes exactly as they were read from the document; the
//! store never inspects or decodes them. A store is shared (`Arc`) between the engine and the
//! renderer, and is emptied in place when teardown fires.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::types::{DocumentId, ImageDimensions};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageStoreError {
    #[error("page index {index} is out of range for a document with {count} pages")]
    IndexOutOfRange { index: usize, count: usize },
}

/// A single page: its position and its opaque encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub payload: Arc<[u8]>,
    /// Decoded size, when the loader could read it from the image header.
    pub dimensions: Option<ImageDimensions>,
}

impl Page {
    pub fn bytes(&self) -> &[u8] {
        &self.payload
    }
}

#[derive(Debug)]
pub struct PageStore {
    document: DocumentId,
    pages: RwLock<Vec<Page>>,
}

impl PageStore {
    /// Build a store from payloads in reading order.
    pub fn new<I, B>(document: DocumentId, payloads: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Arc<[u8]>>,
    {
        Self::with_dimensions(document, payloads.into_iter().map(|bytes| (bytes, None)))
    }

    /// Build a store from payloads paired with an optional decoded-size hint.
    pub fn with_dimensions<I, B>(document: DocumentId, payloads: I) -> Self
    where
        I: IntoIterator<Item = (B, Option<ImageDimensions>)>,
        B: Into<Arc<[u8]>>,
    {
        let pages = payloads
            .into_iter()
            .enumerate()
            .map(|(index, (bytes, dimensions))| Page { index, payload: bytes.into(), dimensions })
            .collect();
        Self { document, pages: RwLock::new(pages) }
    }

    pub fn empty(document: DocumentId) -> Self {
        Self { document, pages: RwLock::new(Vec::new()) }
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn count(&self) -> usize {
        self.pages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Fetch a page. Indices outside `[0, count)` are a caller bug and are reported, not clamped.
    pub fn get(&self, index: usize) -> Result<Page, PageStoreError> {
        let pages = self.pages.read();
        pages
            .get(index)
            .cloned()
            .ok_or(PageStoreError::IndexOutOfRange { index, count: pages.len() })
    }

    /// Drop every payload. The store reports zero pages afterwards.
    pub fn release(&self) {
        let released = std::mem::take(&mut *self.pages.write());
        tracing::debug!(
            document = self.document.as_str(),
            pages = released.len(),
            "released page store"
        );
    }
}
