//! Encoding framed captures to the configured file type.
//!
//! JPEG, PNG and GIF are produced with the `image` crate's encoders. GIF
//! output is palette-quantised by the encoder.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::frame::{expected_len, ImageFrame};
use crate::prefs::FileType;

/// JPEG quality used for saved captures.
pub const JPEG_QUALITY: u8 = 90;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: &'static str, reason: String },
}

/// Encode a frame as `file_type`.
pub fn encode_image(frame: &ImageFrame, file_type: FileType) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (frame.width, frame.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = expected_len(width, height);
    if frame.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: frame.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let result = match file_type {
        FileType::Jpg => JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY).write_image(
            &frame.pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        FileType::Png => PngEncoder::new(&mut buffer).write_image(
            &frame.pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        FileType::Gif => {
            let rgba = to_rgba(&frame.pixels);
            GifEncoder::new(&mut buffer).encode(&rgba, width, height, ExtendedColorType::Rgba8)
        }
    };
    result.map_err(|e| EncodeError::EncodingFailed {
        format: file_type.extension(),
        reason: e.to_string(),
    })?;

    log::debug!(
        "Encoded {}x{} capture as {} ({} bytes)",
        width,
        height,
        file_type.extension(),
        buffer.get_ref().len()
    );
    Ok(buffer.into_inner())
}

fn to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for px in rgb.chunks_exact(3) {
        rgba.extend_from_slice(px);
        rgba.push(u8::MAX);
    }
    rgba
}
