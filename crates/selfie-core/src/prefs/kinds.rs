//! Persisted enumerations.
//!
//! Each enum is stored as its integer raw value. Decoding goes through
//! `from_raw`, which maps unrecognised values to a fixed fallback so that
//! settings written by other versions still load.

use serde::{Deserialize, Serialize};

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum FileType {
    #[default]
    Jpg = 0,
    Png = 1,
    Gif = 2,
}

impl FileType {
    pub const ALL: [FileType; 3] = [FileType::Jpg, FileType::Png, FileType::Gif];

    /// Decode a raw value; unknown values fall back to JPEG.
    pub fn from_raw(value: i64) -> Self {
        match value {
            0 => FileType::Jpg,
            1 => FileType::Png,
            2 => FileType::Gif,
            _ => FileType::Jpg,
        }
    }

    pub fn raw(self) -> i64 {
        self as i64
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Jpg => "jpg",
            FileType::Png => "png",
            FileType::Gif => "gif",
        }
    }

    /// MIME type used when the encoded image itself goes to the clipboard.
    pub fn mime_type(self) -> &'static str {
        match self {
            FileType::Jpg => "image/jpeg",
            FileType::Png => "image/png",
            FileType::Gif => "image/gif",
        }
    }

    /// The image crate's format for this file type.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            FileType::Jpg => image::ImageFormat::Jpeg,
            FileType::Png => image::ImageFormat::Png,
            FileType::Gif => image::ImageFormat::Gif,
        }
    }
}

impl From<i64> for FileType {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl From<FileType> for i64 {
    fn from(value: FileType) -> Self {
        value.raw()
    }
}

/// What goes to the clipboard after a capture is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum CopyStyle {
    /// Leave the clipboard alone.
    #[default]
    Nothing = 0,
    /// The encoded image bytes.
    Image = 1,
    /// A `file://` URL to the saved file.
    FileReference = 2,
    /// Path text, formatted per [`CopyPathStyle`].
    PathText = 3,
}

impl CopyStyle {
    /// Decode a raw value; unknown values fall back to [`CopyStyle::Nothing`].
    pub fn from_raw(value: i64) -> Self {
        match value {
            0 => CopyStyle::Nothing,
            1 => CopyStyle::Image,
            2 => CopyStyle::FileReference,
            3 => CopyStyle::PathText,
            _ => CopyStyle::Nothing,
        }
    }

    pub fn raw(self) -> i64 {
        self as i64
    }

    /// Only path text uses the copy-path style and path root.
    pub fn uses_path_settings(self) -> bool {
        self == CopyStyle::PathText
    }
}

impl From<i64> for CopyStyle {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl From<CopyStyle> for i64 {
    fn from(value: CopyStyle) -> Self {
        value.raw()
    }
}

/// Text format for copied paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum CopyPathStyle {
    /// The absolute path of the saved file.
    #[default]
    Plain = 0,
    /// `<img alt="stem" src="relative">`
    HtmlImage = 1,
    /// `![stem](relative)`
    Markdown = 2,
}

impl CopyPathStyle {
    /// Decode a raw value; unknown values fall back to [`CopyPathStyle::Plain`].
    pub fn from_raw(value: i64) -> Self {
        match value {
            0 => CopyPathStyle::Plain,
            1 => CopyPathStyle::HtmlImage,
            2 => CopyPathStyle::Markdown,
            _ => CopyPathStyle::Plain,
        }
    }

    pub fn raw(self) -> i64 {
        self as i64
    }
}

impl From<i64> for CopyPathStyle {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl From<CopyPathStyle> for i64 {
    fn from(value: CopyPathStyle) -> Self {
        value.raw()
    }
}
