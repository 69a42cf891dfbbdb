//! Page image conversion, kept outside the navigation engine.

pub mod image;

pub use image::{DecodedImage, convert, decode_bytes, probe_dimensions};

pub type Result<T> = crate::Result<T>;
