//! Captured frame types.
//!
//! Framing only needs a frame's dimensions and its pixel bytes, so camera
//! backends hand frames over through the [`FrameSource`] trait. [`ImageFrame`]
//! is the owned RGB buffer used everywhere inside the crate.

use serde::{Deserialize, Serialize};

/// Read access to a captured RGB frame.
///
/// Implementors expose packed RGB8 pixels in row-major order, 3 bytes per
/// pixel, with no row padding.
pub trait FrameSource {
    /// Frame width in pixels.
    fn width(&self) -> u32;

    /// Frame height in pixels.
    fn height(&self) -> u32;

    /// RGB pixel data. Length should be `width * height * 3`.
    fn pixels(&self) -> &[u8];
}

/// Filter type for the scaling step of framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An owned RGB frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl ImageFrame {
    /// Create a new frame with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a frame filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(expected_len(width, height))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Copy any frame source into an owned frame.
    pub fn from_source(source: &impl FrameSource) -> Self {
        Self {
            width: source.width(),
            height: source.height(),
            pixels: source.pixels().to_vec(),
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage. Returns `None` when the buffer does not
    /// match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// RGB value at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 3;
        let px = self.pixels.get(idx..idx + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// Check if this is an empty/invalid frame.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

impl FrameSource for ImageFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Byte length of a packed RGB8 buffer.
pub(crate) fn expected_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * 3
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BorrowedFrame<'a> {
        width: u32,
        height: u32,
        data: &'a [u8],
    }

    impl FrameSource for BorrowedFrame<'_> {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn pixels(&self) -> &[u8] {
            self.data
        }
    }

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_filled_frame() {
        let frame = ImageFrame::filled(4, 2, [1, 2, 3]);
        assert_eq!(frame.pixels.len(), 24);
        assert_eq!(frame.pixel(3, 1), Some([1, 2, 3]));
        assert_eq!(frame.pixel(4, 0), None);
    }

    #[test]
    fn test_from_source_copies_pixels() {
        let data = vec![9u8; 2 * 2 * 3];
        let borrowed = BorrowedFrame {
            width: 2,
            height: 2,
            data: &data,
        };
        let frame = ImageFrame::from_source(&borrowed);
        assert_eq!(frame.width, 2);
        assert_eq!(frame.pixels, data);
    }

    #[test]
    fn test_rgb_image_round_trip_keeps_dimensions() {
        let frame = ImageFrame::filled(5, 3, [10, 20, 30]);
        let img = frame.to_rgb_image().unwrap();
        assert_eq!(img.dimensions(), (5, 3));
        assert_eq!(ImageFrame::from_rgb_image(img), frame);
    }

    #[test]
    fn test_to_rgb_image_rejects_short_buffer() {
        let frame = ImageFrame {
            width: 10,
            height: 10,
            pixels: vec![0; 10],
        };
        assert!(frame.to_rgb_image().is_none());
    }

    #[test]
    fn test_empty_frame() {
        assert!(ImageFrame::filled(0, 0, [0, 0, 0]).is_empty());
        assert!(!ImageFrame::filled(1, 1, [0, 0, 0]).is_empty());
    }
}
