//! Applying a computed framing to real pixels.
//!
//! The crop rectangle is mapped back onto the unscaled source, that region
//! is copied out and resized straight to the target size, then mirrored when
//! the horizontal scale is negative. Memory use stays bounded by the source
//! and output sizes rather than the full scaled extent.

use image::{imageops, GenericImage};
use thiserror::Error;

use super::compute::{CaptureConfig, Framing};
use crate::frame::{expected_len, FilterType, FrameSource, ImageFrame};

/// Errors that can occur while applying a framing to pixel data.
#[derive(Debug, Error)]
pub enum FramingError {
    /// Pixel data length doesn't match the declared dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The crop rectangle does not fit the scaled image
    #[error("Crop {width}x{height} at ({x}, {y}) exceeds scaled image {scaled_width}x{scaled_height}")]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        scaled_width: u32,
        scaled_height: u32,
    },
}

/// Resize, mirror and crop `source` according to `framing`.
///
/// The output is exactly `framing.crop.width x framing.crop.height`.
pub fn apply_framing(
    source: &impl FrameSource,
    framing: &Framing,
    filter: FilterType,
) -> Result<ImageFrame, FramingError> {
    let (width, height) = (source.width(), source.height());
    let expected = expected_len(width, height);
    if source.pixels().len() != expected || expected == 0 {
        return Err(FramingError::InvalidPixelData {
            expected,
            actual: source.pixels().len(),
        });
    }

    let crop = framing.crop;
    if crop.right() > framing.scaled_width as u64 || crop.bottom() > framing.scaled_height as u64 {
        return Err(FramingError::CropOutOfBounds {
            x: crop.x,
            y: crop.y,
            width: crop.width,
            height: crop.height,
            scaled_width: framing.scaled_width,
            scaled_height: framing.scaled_height,
        });
    }

    let view = image::ImageBuffer::<image::Rgb<u8>, &[u8]>::from_raw(
        width,
        height,
        source.pixels(),
    )
    .ok_or(FramingError::InvalidPixelData {
        expected,
        actual: source.pixels().len(),
    })?;

    let (left, top, region_w, region_h) = source_region(framing, width, height);
    let mut region = image::RgbImage::new(region_w, region_h);
    region
        .copy_from(&*imageops::crop_imm(&view, left, top, region_w, region_h), 0, 0)
        .expect("region fits its own dimensions");

    // Fast path: no resampling when the region already has the output size
    let mut framed = if (region_w, region_h) == (crop.width, crop.height) {
        region
    } else {
        imageops::resize(&region, crop.width, crop.height, filter.to_image_filter())
    };

    if framing.is_mirrored() {
        imageops::flip_horizontal_in_place(&mut framed);
    }

    Ok(ImageFrame::from_rgb_image(framed))
}

/// Region of the unscaled source covered by the crop, as
/// `(left, top, width, height)`. Always non-empty and inside the source.
///
/// A mirrored crop at `x` covers the unmirrored scaled columns starting at
/// `scaled_width - x - width`.
fn source_region(
    framing: &Framing,
    source_width: u32,
    source_height: u32,
) -> (u32, u32, u32, u32) {
    let crop = framing.crop;
    let x = if framing.is_mirrored() {
        framing.scaled_width - crop.x - crop.width
    } else {
        crop.x
    };
    let (left, width) = project(x, crop.width, framing.scale, source_width);
    let (top, height) = project(crop.y, crop.height, framing.scale, source_height);
    (left, top, width, height)
}

/// Map a scaled span onto `0..limit` source pixels.
fn project(offset: u32, len: u32, scale: f64, limit: u32) -> (u32, u32) {
    let start = (offset as f64 / scale).round().clamp(0.0, (limit - 1) as f64) as u32;
    let end = ((offset as u64 + len as u64) as f64 / scale)
        .round()
        .min(limit as f64) as u32;
    (start, end.saturating_sub(start).max(1))
}

/// Frame a captured source for the given output configuration.
///
/// `Ok(None)` means framing is unavailable for these dimensions; the caller
/// should skip the capture.
pub fn frame_image(
    source: &impl FrameSource,
    config: &CaptureConfig,
    filter: FilterType,
) -> Result<Option<ImageFrame>, FramingError> {
    let Some(framing) = config.framing_for(source.width(), source.height()) else {
        log::warn!(
            "Framing unavailable for {}x{} source -> {}x{}",
            source.width(),
            source.height(),
            config.target_width,
            config.target_height
        );
        return Ok(None);
    };

    log::debug!(
        "Framing {}x{} source: scale {:.4}, scaled {}x{}, crop at ({}, {})",
        source.width(),
        source.height(),
        framing.scale_x,
        framing.scaled_width,
        framing.scaled_height,
        framing.crop.x,
        framing.crop.y
    );
    apply_framing(source, &framing, filter).map(Some)
}
