//! Framing: fixed-size output from an arbitrarily sized camera frame.
//!
//! # Algorithm
//!
//! 1. Cover scale: `max(target_w / source_w, target_h / source_h)`
//! 2. Optional horizontal mirror (negative horizontal scale)
//! 3. Centered crop of exactly `target_w x target_h`
//!
//! The output never letterboxes; the overhanging dimension is cropped.
//!
//! # Coordinate System
//!
//! - Crop coordinates are in pixels of the scaled image
//! - Origin is top-left corner

mod apply;
mod compute;

pub use apply::{apply_framing, frame_image, FramingError};
pub use compute::{compute_framing, CaptureConfig, CropRect, Framing};
