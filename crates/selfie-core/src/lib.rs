//! Selfie Core - webcam still capture processing
//!
//! This crate provides the platform-independent part of the selfie capture
//! utility: framing a camera frame to a fixed output size, encoding it,
//! naming and saving it, and formatting what gets copied to the clipboard.
//! Camera, clipboard and preference storage are supplied by the host shell
//! through traits.

pub mod capture;
pub mod copy;
pub mod encode;
pub mod frame;
pub mod framing;
pub mod naming;
pub mod path;
pub mod prefs;

pub use capture::{
    process_capture, save_capture, Camera, CameraError, CaptureError, Clipboard, ClipboardError,
    EncodedCapture, SavedCapture, Session,
};
pub use copy::{copy_payload, copy_text, file_url, CopyPayload};
pub use encode::{encode_image, EncodeError};
pub use frame::{FilterType, FrameSource, ImageFrame};
pub use framing::{apply_framing, compute_framing, frame_image, CaptureConfig, CropRect, Framing};
pub use naming::{format_file_name, now_local};
pub use path::{expand_tilde, relative_path};
pub use prefs::{
    CopyPathStyle, CopyStyle, FileType, JsonFileStore, MemoryStore, PreferenceError,
    PreferenceStore, Preferences,
};
