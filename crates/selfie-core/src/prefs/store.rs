//! Preference persistence.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use thiserror::Error;

use super::Preferences;

/// Errors that can occur while loading or saving preferences.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object.
    #[error("Malformed preferences file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// The store's lock was poisoned by a panicking writer.
    #[error("Preference store lock poisoned")]
    Poisoned,
}

/// Load/save collaborator for [`Preferences`].
pub trait PreferenceStore {
    /// Load preferences; missing entries take their defaults.
    fn load(&self) -> Result<Preferences, PreferenceError>;

    /// Persist every preference.
    fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError>;
}

/// In-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with raw values, as if written by another version.
    pub fn with_values(values: Map<String, Value>) -> Self {
        Self {
            values: Mutex::new(values),
        }
    }

    /// Snapshot of the raw stored values.
    pub fn values(&self) -> Result<Map<String, Value>, PreferenceError> {
        let values = self.values.lock().map_err(|_| PreferenceError::Poisoned)?;
        Ok(values.clone())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Preferences, PreferenceError> {
        let values = self.values.lock().map_err(|_| PreferenceError::Poisoned)?;
        Ok(Preferences::from_values(&values))
    }

    fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().map_err(|_| PreferenceError::Poisoned)?;
        values.extend(prefs.to_values());
        Ok(())
    }
}

/// Preferences stored as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_preferences_path`].
    pub fn open_default() -> Self {
        Self::new(default_preferences_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_values(&self) -> Result<Map<String, Value>, PreferenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No preferences at {}, using defaults", self.path.display());
                return Ok(Map::new());
            }
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(values)) => Ok(values),
            Ok(other) => Err(PreferenceError::Malformed {
                path: self.path.clone(),
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
            Err(e) => Err(PreferenceError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Result<Preferences, PreferenceError> {
        Ok(Preferences::from_values(&self.read_values()?))
    }

    fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        // Keys this version does not know about are kept
        let mut values = match self.read_values() {
            Ok(values) => values,
            Err(PreferenceError::Malformed { reason, .. }) => {
                log::warn!(
                    "Overwriting malformed preferences at {}: {}",
                    self.path.display(),
                    reason
                );
                Map::new()
            }
            Err(e) => return Err(e),
        };
        values.extend(prefs.to_values());

        let text = serde_json::to_string_pretty(&Value::Object(values)).map_err(|e| {
            PreferenceError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;
        fs::write(&self.path, text).map_err(io_err)?;
        log::info!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

/// `<config dir>/selfie/preferences.json`, falling back to the home
/// directory and then the working directory.
pub fn default_preferences_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("selfie");
    path.push("preferences.json");
    path
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
