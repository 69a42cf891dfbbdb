//! Navigation and rendering engine for a comic book viewer.
//!
//! The crate holds the pages of an open document, tracks the reading position, turns viewport
//! taps into navigation, and tells an external renderer when to redraw. Platform views bind to
//! [`engine::ComicBookEngine`]; [`app::Application`] wires document opening and shutdown.

#![deny(missing_debug_implementations)]

pub mod app;
pub mod codec;
pub mod config;
pub mod engine;
pub mod fs;
pub mod log;
pub mod nav;
pub mod notify;
pub mod store;
pub mod teardown;
pub mod types;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub use app::Application;
pub use config::EngineConfig;
pub use engine::{ComicBookEngine, Dependency, ViewportSource};
pub use nav::{Navigator, TapZones};
pub use notify::{Property, PropertyChange, PropertyValue};
pub use store::{Page, PageStore, PageStoreError};
pub use teardown::Teardown;
pub use types::{
    ContentMode, Direction, DocumentId, FitMode, ImageDimensions, Intent, Point, Rect, Size,
};

/// Returns the version of the engine crate for diagnostics.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_semver_version() {
        assert!(version().contains('.'));
    }
}
