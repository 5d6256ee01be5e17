//! Capture pipeline: camera frame → framing → encoding → file → clipboard.
//!
//! The camera and clipboard are collaborators supplied by the host shell
//! through the [`Camera`] and [`Clipboard`] traits. Each capture is
//! independent; failures are returned to the shell to report, never retried.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::copy::{copy_payload, CopyPayload};
use crate::encode::{encode_image, EncodeError};
use crate::frame::{FilterType, FrameSource, ImageFrame};
use crate::framing::{frame_image, FramingError};
use crate::naming::now_local;
use crate::prefs::{FileType, Preferences};

/// Errors reported by a camera backend.
#[derive(Debug, Error)]
pub enum CameraError {
    /// No camera could be connected.
    #[error("Failed to connect to camera service: {0}")]
    Unavailable(String),

    /// The camera was connected but produced no frame.
    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

/// Error reported by a clipboard backend.
#[derive(Debug, Error)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Errors that can occur while taking and saving a capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Writing the encoded file failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Source of still frames.
pub trait Camera {
    /// Native frame size, when the device reports one.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Grab one RGB frame.
    fn capture(&mut self) -> Result<ImageFrame, CameraError>;
}

/// Destination for copy payloads.
pub trait Clipboard {
    /// Replace the clipboard contents with `payload`.
    fn write(&mut self, payload: &CopyPayload) -> Result<(), ClipboardError>;
}

/// A framed and encoded capture, ready to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCapture {
    pub bytes: Vec<u8>,
    pub file_type: FileType,
    pub width: u32,
    pub height: u32,
}

/// Where a capture was saved and what went to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCapture {
    pub path: PathBuf,
    pub payload: CopyPayload,
}

/// Frame and encode a captured frame with the current preferences.
///
/// `Ok(None)` means framing is unavailable for this frame; the capture should
/// be skipped and nothing else changed.
pub fn process_capture(
    frame: &impl FrameSource,
    prefs: &Preferences,
    filter: FilterType,
) -> Result<Option<EncodedCapture>, CaptureError> {
    let Some(framed) = frame_image(frame, &prefs.capture_config(), filter)? else {
        return Ok(None);
    };
    let file_type = prefs.file_type();
    let bytes = encode_image(&framed, file_type)?;
    Ok(Some(EncodedCapture {
        bytes,
        file_type,
        width: framed.width,
        height: framed.height,
    }))
}

/// Write `capture` to `path`, then copy per the preferences.
///
/// The folder must already exist. Returns the payload that was copied.
pub fn save_capture(
    capture: &EncodedCapture,
    path: &Path,
    prefs: &Preferences,
    clipboard: &mut impl Clipboard,
) -> Result<CopyPayload, CaptureError> {
    fs::write(path, &capture.bytes).map_err(|source| CaptureError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Saved {}x{} capture to {} ({} bytes)",
        capture.width,
        capture.height,
        path.display(),
        capture.bytes.len()
    );

    let payload = copy_payload(prefs, path, &capture.bytes, capture.file_type);
    if payload != CopyPayload::Nothing {
        clipboard.write(&payload)?;
        log::debug!("Copied {:?} for {}", prefs.copy_style(), path.display());
    }
    Ok(payload)
}

/// A connected camera and clipboard with the preferences that drive them.
pub struct Session<C, B> {
    camera: C,
    clipboard: B,
    prefs: Preferences,
    filter: FilterType,
}

impl<C: Camera, B: Clipboard> Session<C, B> {
    /// Start a session, fitting the output size to the camera's resolution
    /// when the camera reports one.
    pub fn new(camera: C, clipboard: B, mut prefs: Preferences) -> Self {
        if let Some((width, height)) = camera.dimensions() {
            prefs.adapt_to_camera(width, height);
            log::debug!(
                "Camera {}x{}, output {}x{}",
                width,
                height,
                prefs.width(),
                prefs.height()
            );
        }
        Self {
            camera,
            clipboard,
            prefs,
            filter: FilterType::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.prefs
    }

    /// Grab, frame and encode one frame.
    pub fn capture(&mut self) -> Result<Option<EncodedCapture>, CaptureError> {
        let frame = self.camera.capture()?;
        process_capture(&frame, &self.prefs, self.filter)
    }

    /// Capture and save to a path chosen by the shell (e.g. from a save
    /// dialog when `ask_for_save_path` is set).
    pub fn capture_to(&mut self, path: &Path) -> Result<Option<SavedCapture>, CaptureError> {
        let Some(capture) = self.capture()? else {
            return Ok(None);
        };
        let payload = save_capture(&capture, path, &self.prefs, &mut self.clipboard)?;
        Ok(Some(SavedCapture {
            path: path.to_path_buf(),
            payload,
        }))
    }

    /// Capture and save to the configured folder, named for `at`.
    pub fn capture_at(&mut self, at: &NaiveDateTime) -> Result<Option<SavedCapture>, CaptureError> {
        let path = self.prefs.save_file_path(at);
        self.capture_to(&path)
    }

    /// Capture and save to the configured folder, named for the current
    /// local time.
    pub fn capture_now(&mut self) -> Result<Option<SavedCapture>, CaptureError> {
        self.capture_at(&now_local())
    }

    pub fn into_parts(self) -> (C, B, Preferences) {
        (self.camera, self.clipboard, self.prefs)
    }
}
