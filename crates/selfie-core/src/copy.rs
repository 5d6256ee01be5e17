//! What a saved capture puts on the clipboard.

use std::path::Path;

use crate::path::file_stem;
use crate::prefs::{CopyPathStyle, CopyStyle, FileType, Preferences};

/// Clipboard content produced after a capture is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyPayload {
    /// Leave the clipboard untouched.
    Nothing,
    /// Encoded image bytes with their MIME type.
    Image { bytes: Vec<u8>, mime: &'static str },
    /// `file://` URL of the saved file.
    FileUrl(String),
    /// Plain text.
    Text(String),
}

/// Build the clipboard payload for a file saved at `saved_path`.
pub fn copy_payload(
    prefs: &Preferences,
    saved_path: &Path,
    bytes: &[u8],
    file_type: FileType,
) -> CopyPayload {
    match prefs.copy_style() {
        CopyStyle::Nothing => CopyPayload::Nothing,
        CopyStyle::Image => CopyPayload::Image {
            bytes: bytes.to_vec(),
            mime: file_type.mime_type(),
        },
        CopyStyle::FileReference => CopyPayload::FileUrl(file_url(saved_path)),
        CopyStyle::PathText => CopyPayload::Text(copy_text(prefs, saved_path)),
    }
}

/// Path text for `saved_path` in the configured copy-path style.
pub fn copy_text(prefs: &Preferences, saved_path: &Path) -> String {
    match prefs.copy_path_style() {
        CopyPathStyle::Plain => saved_path.to_string_lossy().into_owned(),
        CopyPathStyle::HtmlImage => format!(
            "<img alt=\"{}\" src=\"{}\">",
            file_stem(saved_path),
            prefs.relative_file_path(saved_path)
        ),
        CopyPathStyle::Markdown => format!(
            "![{}]({})",
            file_stem(saved_path),
            prefs.relative_file_path(saved_path)
        ),
    }
}

/// `file://` URL for an absolute path. Unreserved characters, sub-delims,
/// `:`, `@` and `/` are kept; everything else is percent-encoded.
pub fn file_url(path: &Path) -> String {
    let text = path.to_string_lossy();
    let mut url = String::with_capacity(text.len() + 8);
    url.push_str("file://");
    if !text.starts_with('/') {
        url.push('/');
    }
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || b"/-._~!$&'()*+,;=:@".contains(&byte) {
            url.push(byte as char);
        } else {
            url.push_str(&format!("%{:02X}", byte));
        }
    }
    url
}
