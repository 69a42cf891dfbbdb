//! Conversion of encoded page bytes into a displayable RGBA surface.

use std::io::Cursor;

use anyhow::{Context, anyhow};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder as _, ImageReader, RgbaImage};
use moxcms::{CmsError, ColorProfile, Layout, TransformOptions};
use tracing::warn;

use crate::store::Page;
use crate::types::ImageDimensions;

use super::Result;

/// Straight-alpha RGBA8888 pixels, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub dimensions: ImageDimensions,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Convert a page's payload into pixels ready for presentation.
pub fn convert(page: &Page) -> Result<DecodedImage> {
    decode_bytes(page.bytes()).with_context(|| format!("converting page {}", page.index))
}

/// Decode the first frame of an in-memory image.
///
/// The format is sniffed from the bytes. EXIF orientation is applied and an embedded ICC profile
/// is converted to sRGB; a profile that cannot be applied is logged and skipped.
pub fn decode_bytes(data: &[u8]) -> Result<DecodedImage> {
    if data.is_empty() {
        return Err(anyhow!("empty image data"));
    }

    let mut decoder = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .context("guessing image format")?
        .into_decoder()
        .context("constructing image decoder")?;

    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let icc_profile = decoder.icc_profile().unwrap_or(None);

    let mut image = DynamicImage::from_decoder(decoder).context("decoding image")?;
    if orientation != Orientation::NoTransforms {
        image.apply_orientation(orientation);
    }

    let mut rgba = image.into_rgba8();
    if let Some(profile) = icc_profile {
        if let Err(err) = to_srgb(&mut rgba, &profile) {
            warn!(target: "codec::image", "skipping embedded ICC profile: {err:#}");
        }
    }

    let dimensions = ImageDimensions { width: rgba.width(), height: rgba.height() };
    Ok(DecodedImage { dimensions, pixels: rgba.into_raw() })
}

/// Read the pixel size from the image header without decoding the pixels.
pub fn probe_dimensions(data: &[u8]) -> Option<ImageDimensions> {
    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format().ok()?;
    reader.format()?;
    let (width, height) = reader.into_dimensions().ok()?;
    Some(ImageDimensions { width, height })
}

fn to_srgb(image: &mut RgbaImage, profile_bytes: &[u8]) -> Result<()> {
    let source = ColorProfile::new_from_slice(profile_bytes)
        .map_err(|err| anyhow!("invalid ICC profile: {err}"))?;
    let srgb = ColorProfile::new_srgb();

    let options = TransformOptions::default();
    let rgba_transform = source.create_transform_8bit(Layout::Rgba, &srgb, Layout::Rgba, options);

    match rgba_transform {
        Ok(transform) => {
            let raw = image.as_mut();
            let mut converted = vec![0u8; raw.len()];
            transform
                .transform(&raw[..], &mut converted)
                .map_err(|err| anyhow!("icc transform failed: {err}"))?;
            raw.copy_from_slice(&converted);
            Ok(())
        }
        // Some profiles (gray, CMYK-derived) only offer an RGB pipeline; alpha is carried over.
        Err(CmsError::InvalidLayout) => {
            let transform = source.create_transform_8bit(
                Layout::Rgb,
                &srgb,
                Layout::Rgb,
                TransformOptions::default(),
            )?;
            let raw = image.as_mut();
            let rgb: Vec<u8> = raw.chunks_exact(4).flat_map(|px| px[..3].iter().copied()).collect();
            let mut converted = vec![0u8; rgb.len()];
            transform
                .transform(&rgb, &mut converted)
                .map_err(|err| anyhow!("icc transform failed: {err}"))?;
            for (px, rgb_px) in raw.chunks_exact_mut(4).zip(converted.chunks_exact(3)) {
                px[..3].copy_from_slice(rgb_px);
            }
            Ok(())
        }
        Err(err) => Err(anyhow!("icc transform setup failed: {err}")),
    }
}
