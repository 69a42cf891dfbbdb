//! Shared value types exchanged between the engine, its loaders, and the hosting shell.

use serde::{Deserialize, Serialize};

/// Identifier for an opened document (folder, archive, single image).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Viewport dimensions in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Construct a size, clamping negative or NaN extents to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width: non_negative(width), height: non_negative(height) }
    }

    /// A viewport that has not been measured yet (or collapsed) cannot drive navigation.
    pub fn is_degenerate(&self) -> bool {
        let measured = self.width > 0.0 && self.height > 0.0;
        !(measured && self.width.is_finite() && self.height.is_finite())
    }
}

fn non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Tap position in the viewport's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, used for the on-screen placement of a page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    FitWidth,
    FitHeight,
    #[default]
    FitContain,
    Original,
    Fill,
}

/// Which kind of document content is considered active for rendering.
///
/// New kinds are added here together with their [`ModeBehavior`]; the navigation state machine
/// itself does not change shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ContentMode {
    #[default]
    ComicBook,
    SingleImage,
}

/// How a content mode reacts to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeBehavior {
    /// Left/right tap bands turn pages. When false every tap toggles the overlay.
    pub paged: bool,
}

impl ContentMode {
    pub fn behavior(self) -> ModeBehavior {
        match self {
            ContentMode::ComicBook => ModeBehavior { paged: true },
            ContentMode::SingleImage => ModeBehavior { paged: false },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentMode::ComicBook => "comic_book",
            ContentMode::SingleImage => "single_image",
        }
    }

    /// Parse the snake_case tag used in configuration files and the command prompt.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "comic_book" | "comic" => Some(ContentMode::ComicBook),
            "single_image" | "image" => Some(ContentMode::SingleImage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

/// Abstract action resolved from a tap, decoupled from the input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Previous,
    Next,
    ToggleOverlay,
    None,
}
