//! Cover scaling and centered crop geometry.

use serde::{Deserialize, Serialize};

/// Scaled extents within this distance below a whole pixel count are treated
/// as landing on it.
const EXTENT_EPSILON: f64 = 1e-6;

/// Output size and mirroring for a single capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Output width in pixels (must be > 0).
    pub target_width: u32,
    /// Output height in pixels (must be > 0).
    pub target_height: u32,
    /// Mirror the image about its vertical axis.
    pub flip_horizontal: bool,
}

impl CaptureConfig {
    pub fn new(target_width: u32, target_height: u32, flip_horizontal: bool) -> Self {
        Self {
            target_width,
            target_height,
            flip_horizontal,
        }
    }

    /// Framing for a source of the given size.
    pub fn framing_for(&self, source_width: u32, source_height: u32) -> Option<Framing> {
        compute_framing(
            source_width,
            source_height,
            self.target_width,
            self.target_height,
            self.flip_horizontal,
        )
    }
}

/// Crop rectangle in scaled-image pixel coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }
}

/// Scale-to-cover transform plus the centered crop that yields the target size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Framing {
    /// Scale magnitude applied to both axes.
    pub scale: f64,
    /// Horizontal scale component; negative when the image is mirrored.
    pub scale_x: f64,
    /// Vertical scale component.
    pub scale_y: f64,
    /// Width of the scaled source in whole pixels.
    pub scaled_width: u32,
    /// Height of the scaled source in whole pixels.
    pub scaled_height: u32,
    /// Region of the scaled source kept in the output.
    pub crop: CropRect,
}

impl Framing {
    /// True when the horizontal component mirrors the image.
    pub fn is_mirrored(&self) -> bool {
        self.scale_x < 0.0
    }

    /// Output dimensions, always the requested target size.
    pub fn output_size(&self) -> (u32, u32) {
        (self.crop.width, self.crop.height)
    }
}

/// Compute the cover scale and centered crop for a source frame.
///
/// The scale is the smallest one that makes the scaled source cover the
/// target on both axes. The scaled source is materialised as whole pixels
/// (its extent rounded up) and the crop is centered in it, with the offset
/// truncated toward zero.
///
/// Returns `None` ("framing unavailable") when any dimension is zero or the
/// crop rectangle would not fit inside the scaled image.
pub fn compute_framing(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
    flip_horizontal: bool,
) -> Option<Framing> {
    if source_width == 0 || source_height == 0 || target_width == 0 || target_height == 0 {
        return None;
    }

    let (src_w, src_h) = (source_width as f64, source_height as f64);
    let (dst_w, dst_h) = (target_width as f64, target_height as f64);

    let scale = (dst_w / src_w).max(dst_h / src_h);
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }
    let scale_x = if flip_horizontal { -scale } else { scale };

    let scaled_width = integral_extent(src_w * scale)?;
    let scaled_height = integral_extent(src_h * scale)?;

    let crop_x = (scaled_width as f64 / 2.0 - dst_w / 2.0).trunc();
    let crop_y = (scaled_height as f64 / 2.0 - dst_h / 2.0).trunc();
    if crop_x < 0.0 || crop_y < 0.0 {
        return None;
    }

    let crop = CropRect {
        x: crop_x as u32,
        y: crop_y as u32,
        width: target_width,
        height: target_height,
    };
    if crop.right() > scaled_width as u64 || crop.bottom() > scaled_height as u64 {
        return None;
    }

    Some(Framing {
        scale,
        scale_x,
        scale_y: scale,
        scaled_width,
        scaled_height,
        crop,
    })
}

/// Round a scaled extent up to whole pixels.
fn integral_extent(extent: f64) -> Option<u32> {
    let pixels = (extent - EXTENT_EPSILON).ceil();
    if !pixels.is_finite() || pixels < 1.0 || pixels > u32::MAX as f64 {
        return None;
    }
    Some(pixels as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_to_square() {
        let framing = compute_framing(1280, 720, 500, 500, false).unwrap();

        assert!((framing.scale - 0.694).abs() < 0.001);
        assert_eq!(framing.scaled_width, 889);
        assert_eq!(framing.scaled_height, 500);
        assert_eq!(framing.output_size(), (500, 500));
        // 889 / 2 - 250 = 194.5, truncated
        assert_eq!(framing.crop.x, 194);
        assert_eq!(framing.crop.y, 0);
    }

    #[test]
    fn test_portrait_source() {
        let framing = compute_framing(720, 1280, 400, 300, false).unwrap();

        // Width dominates: 400 / 720
        assert_eq!(framing.scaled_width, 400);
        assert_eq!(framing.scaled_height, 712);
        assert_eq!(framing.crop.x, 0);
        assert_eq!(framing.crop.y, 206);
    }

    #[test]
    fn test_same_size_is_identity() {
        let framing = compute_framing(640, 480, 640, 480, false).unwrap();

        assert_eq!(framing.scale, 1.0);
        assert_eq!(framing.scaled_width, 640);
        assert_eq!(framing.scaled_height, 480);
        assert_eq!(framing.crop, CropRect { x: 0, y: 0, width: 640, height: 480 });
    }

    #[test]
    fn test_upscale_small_source() {
        let framing = compute_framing(100, 50, 400, 400, false).unwrap();

        assert_eq!(framing.scale, 8.0);
        assert_eq!(framing.scaled_width, 800);
        assert_eq!(framing.scaled_height, 400);
        assert_eq!(framing.crop.x, 200);
    }

    #[test]
    fn test_flip_negates_horizontal_scale_only() {
        let plain = compute_framing(1280, 720, 500, 500, false).unwrap();
        let flipped = compute_framing(1280, 720, 500, 500, true).unwrap();

        assert!(flipped.is_mirrored());
        assert!(!plain.is_mirrored());
        assert_eq!(flipped.scale_x, -plain.scale);
        assert_eq!(flipped.scale_y, plain.scale);
        assert_eq!(flipped.crop, plain.crop);
        assert_eq!(flipped.scaled_width, plain.scaled_width);
    }

    #[test]
    fn test_zero_dimensions_unavailable() {
        assert!(compute_framing(0, 720, 500, 500, false).is_none());
        assert!(compute_framing(1280, 0, 500, 500, false).is_none());
        assert!(compute_framing(1280, 720, 0, 500, false).is_none());
        assert!(compute_framing(1280, 720, 500, 0, false).is_none());
    }

    #[test]
    fn test_unrepresentable_scaled_extent_unavailable() {
        // Scaled height would be 2 * 4e9 pixels.
        assert!(compute_framing(1, 2, 4_000_000_000, 1, false).is_none());
    }

    #[test]
    fn test_capture_config_framing() {
        let config = CaptureConfig::new(250, 250, true);
        let framing = config.framing_for(1920, 1080).unwrap();

        assert_eq!(framing.output_size(), (250, 250));
        assert!(framing.is_mirrored());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=4096, 1u32..=4096)
    }

    proptest! {
        /// Property: the crop is always exactly the target size.
        #[test]
        fn prop_crop_matches_target(
            (sw, sh) in dimensions_strategy(),
            (tw, th) in dimensions_strategy(),
            flip in any::<bool>(),
        ) {
            let framing = compute_framing(sw, sh, tw, th, flip);
            prop_assert!(framing.is_some(), "framing should exist for positive sizes");
            let framing = framing.unwrap();
            prop_assert_eq!(framing.crop.width, tw);
            prop_assert_eq!(framing.crop.height, th);
        }

        /// Property: scaling covers the target on both axes.
        #[test]
        fn prop_scale_covers_target(
            (sw, sh) in dimensions_strategy(),
            (tw, th) in dimensions_strategy(),
        ) {
            let framing = compute_framing(sw, sh, tw, th, false).unwrap();
            let eps = 1e-6;
            prop_assert!(framing.scale * sw as f64 >= tw as f64 - eps);
            prop_assert!(framing.scale * sh as f64 >= th as f64 - eps);
            prop_assert!(framing.scaled_width >= tw);
            prop_assert!(framing.scaled_height >= th);
        }

        /// Property: the crop is centered in the scaled image.
        #[test]
        fn prop_crop_is_centered(
            (sw, sh) in dimensions_strategy(),
            (tw, th) in dimensions_strategy(),
        ) {
            let framing = compute_framing(sw, sh, tw, th, false).unwrap();
            let expected_x = (framing.scaled_width as f64 / 2.0 - tw as f64 / 2.0).trunc() as u32;
            let expected_y = (framing.scaled_height as f64 / 2.0 - th as f64 / 2.0).trunc() as u32;
            prop_assert_eq!(framing.crop.x, expected_x);
            prop_assert_eq!(framing.crop.y, expected_y);
        }

        /// Property: the crop never leaves the scaled bounds.
        #[test]
        fn prop_crop_within_bounds(
            (sw, sh) in dimensions_strategy(),
            (tw, th) in dimensions_strategy(),
            flip in any::<bool>(),
        ) {
            let framing = compute_framing(sw, sh, tw, th, flip).unwrap();
            prop_assert!(framing.crop.right() <= framing.scaled_width as u64);
            prop_assert!(framing.crop.bottom() <= framing.scaled_height as u64);
        }

        /// Property: framing is deterministic.
        #[test]
        fn prop_framing_is_deterministic(
            (sw, sh) in dimensions_strategy(),
            (tw, th) in dimensions_strategy(),
            flip in any::<bool>(),
        ) {
            prop_assert_eq!(
                compute_framing(sw, sh, tw, th, flip),
                compute_framing(sw, sh, tw, th, flip)
            );
        }
    }
}
