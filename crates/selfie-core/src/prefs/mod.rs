//! Capture preferences.
//!
//! [`Preferences`] is an explicit value passed to the capture pipeline.
//! Persistence lives behind the [`PreferenceStore`] trait; values are read
//! key by key so that a missing or malformed entry falls back to its own
//! default without affecting the others.

mod kinds;
mod store;

pub use kinds::{CopyPathStyle, CopyStyle, FileType};
pub use store::{
    default_preferences_path, JsonFileStore, MemoryStore, PreferenceError, PreferenceStore,
};

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::framing::CaptureConfig;
use crate::path::{expand_tilde, relative_path};

/// Smallest output width accepted by [`Preferences::set_width`].
pub const MIN_WIDTH: u32 = 100;
/// Smallest output height accepted by [`Preferences::set_height`].
pub const MIN_HEIGHT: u32 = 100;
/// Height of the live preview; its width follows the output aspect ratio.
pub const PREVIEW_HEIGHT: u32 = 250;

pub const DEFAULT_WIDTH: u32 = 250;
pub const DEFAULT_HEIGHT: u32 = 250;
pub const DEFAULT_FILE_NAME: &str = "yyyyMMdd-HHmmss";
pub const DEFAULT_SAVE_FOLDER: &str = "~/Downloads";
pub const DEFAULT_PATH_ROOT: &str = "~/Downloads";

/// Persisted key names.
pub mod keys {
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const FLIP_X: &str = "flipX";
    pub const FILE_NAME: &str = "fileName";
    pub const FILE_TYPE: &str = "fileType";
    pub const SAVE_FOLDER: &str = "saveFolder";
    pub const ASK_FOR_SAVE_PATH: &str = "askForSavePath";
    pub const COPY_STYLE: &str = "copyStyle";
    pub const COPY_PATH_STYLE: &str = "copyPathStyle";
    pub const PATH_ROOT: &str = "pathRoot";
}

/// User preferences for capture output, naming, saving and copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    width: u32,
    height: u32,
    flip_x: bool,
    file_name: String,
    file_type: FileType,
    save_folder: String,
    ask_for_save_path: bool,
    copy_style: CopyStyle,
    copy_path_style: CopyPathStyle,
    path_root: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            flip_x: false,
            file_name: DEFAULT_FILE_NAME.to_string(),
            file_type: FileType::Jpg,
            save_folder: DEFAULT_SAVE_FOLDER.to_string(),
            ask_for_save_path: true,
            copy_style: CopyStyle::FileReference,
            copy_path_style: CopyPathStyle::Plain,
            path_root: DEFAULT_PATH_ROOT.to_string(),
        }
    }
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Set the output width, raised to at least [`MIN_WIDTH`].
    pub fn set_width(&mut self, value: i64) {
        self.width = value.clamp(MIN_WIDTH as i64, u32::MAX as i64) as u32;
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set the output height, raised to at least [`MIN_HEIGHT`].
    pub fn set_height(&mut self, value: i64) {
        self.height = value.clamp(MIN_HEIGHT as i64, u32::MAX as i64) as u32;
    }

    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    pub fn set_flip_x(&mut self, value: bool) {
        self.flip_x = value;
    }

    /// Date pattern used to name saved files.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set_file_name(&mut self, value: &str) {
        self.file_name = value.trim().to_string();
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn set_file_type(&mut self, value: FileType) {
        self.file_type = value;
    }

    /// Save folder as entered, possibly starting with `~`.
    pub fn save_folder(&self) -> &str {
        &self.save_folder
    }

    pub fn set_save_folder(&mut self, value: &str) {
        self.save_folder = value.trim().to_string();
    }

    pub fn ask_for_save_path(&self) -> bool {
        self.ask_for_save_path
    }

    pub fn set_ask_for_save_path(&mut self, value: bool) {
        self.ask_for_save_path = value;
    }

    pub fn copy_style(&self) -> CopyStyle {
        self.copy_style
    }

    pub fn set_copy_style(&mut self, value: CopyStyle) {
        self.copy_style = value;
    }

    pub fn copy_path_style(&self) -> CopyPathStyle {
        self.copy_path_style
    }

    pub fn set_copy_path_style(&mut self, value: CopyPathStyle) {
        self.copy_path_style = value;
    }

    /// Root for relative paths in copied text, possibly starting with `~`.
    /// Empty means copied paths stay absolute.
    pub fn path_root(&self) -> &str {
        &self.path_root
    }

    pub fn set_path_root(&mut self, value: &str) {
        self.path_root = value.trim().to_string();
    }

    /// Output size and mirroring for the next capture.
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig::new(self.width, self.height, self.flip_x)
    }

    /// Fit the output size to a camera's native resolution.
    ///
    /// Each dimension is limited to the camera's and then passed through its
    /// setter, so it never drops below the minimum even for tiny cameras.
    pub fn adapt_to_camera(&mut self, camera_width: u32, camera_height: u32) {
        let width = clamp_between(self.width, MIN_WIDTH, camera_width);
        let height = clamp_between(self.height, MIN_HEIGHT, camera_height);
        self.set_width(width as i64);
        self.set_height(height as i64);
    }

    /// Preview dimensions: fixed height, width following the output aspect.
    pub fn preview_size(&self) -> (f64, f64) {
        let aspect = self.width as f64 / self.height as f64;
        (PREVIEW_HEIGHT as f64 * aspect, PREVIEW_HEIGHT as f64)
    }

    /// Path of `file` as it should appear in copied HTML or Markdown.
    pub fn relative_file_path(&self, file: &Path) -> String {
        let file = file.to_string_lossy();
        if self.path_root.is_empty() {
            return file.into_owned();
        }
        // A relative root is taken from the working directory
        let root = expand_tilde(&self.path_root);
        let root = std::path::absolute(&root).unwrap_or(root);
        relative_path(&root.to_string_lossy(), &file)
    }

    /// Read preferences from a key-value map, defaulting each key that is
    /// missing or holds a value of the wrong type.
    pub fn from_values(values: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            width: read(values, keys::WIDTH, defaults.width),
            height: read(values, keys::HEIGHT, defaults.height),
            flip_x: read(values, keys::FLIP_X, defaults.flip_x),
            file_name: read(values, keys::FILE_NAME, defaults.file_name),
            file_type: FileType::from_raw(read(values, keys::FILE_TYPE, defaults.file_type.raw())),
            save_folder: read(values, keys::SAVE_FOLDER, defaults.save_folder),
            ask_for_save_path: read(values, keys::ASK_FOR_SAVE_PATH, defaults.ask_for_save_path),
            copy_style: CopyStyle::from_raw(read(
                values,
                keys::COPY_STYLE,
                defaults.copy_style.raw(),
            )),
            copy_path_style: CopyPathStyle::from_raw(read(
                values,
                keys::COPY_PATH_STYLE,
                defaults.copy_path_style.raw(),
            )),
            path_root: read(values, keys::PATH_ROOT, defaults.path_root),
        }
    }

    /// Write every preference into a key-value map.
    pub fn to_values(&self) -> Map<String, Value> {
        let mut values = Map::new();
        values.insert(keys::WIDTH.into(), self.width.into());
        values.insert(keys::HEIGHT.into(), self.height.into());
        values.insert(keys::FLIP_X.into(), self.flip_x.into());
        values.insert(keys::FILE_NAME.into(), self.file_name.clone().into());
        values.insert(keys::FILE_TYPE.into(), self.file_type.raw().into());
        values.insert(keys::SAVE_FOLDER.into(), self.save_folder.clone().into());
        values.insert(keys::ASK_FOR_SAVE_PATH.into(), self.ask_for_save_path.into());
        values.insert(keys::COPY_STYLE.into(), self.copy_style.raw().into());
        values.insert(keys::COPY_PATH_STYLE.into(), self.copy_path_style.raw().into());
        values.insert(keys::PATH_ROOT.into(), self.path_root.clone().into());
        values
    }
}

fn read<T: DeserializeOwned>(values: &Map<String, Value>, key: &str, default: T) -> T {
    let Some(value) = values.get(key) else {
        return default;
    };
    match T::deserialize(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Ignoring stored preference '{}': {}", key, e);
            default
        }
    }
}

/// `min` if below it, else `max` if above it. Unlike `Ord::clamp` this does
/// not require `min <= max`; the lower bound is checked first.
fn clamp_between(value: u32, min: u32, max: u32) -> u32 {
    if value < min {
        min
    } else if max < value {
        max
    } else {
        value
    }
}
