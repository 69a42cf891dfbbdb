//! Page storage for an opened document.

pub mod pages;

pub use pages::{Page, PageStore, PageStoreError};
