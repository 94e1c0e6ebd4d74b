//! Persisted display preferences.
//!
//! Preferences live in a small JSON file under the data directory so the
//! theme choice survives restarts. A missing or malformed file falls back
//! to defaults rather than blocking startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON key the theme flag is stored under. External tooling reads this too.
pub const DARK_MODE_KEY: &str = "dark_mode";

const PREFS_FILE: &str = "prefs.json";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write preferences to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(rename = "dark_mode", default = "default_dark_mode")]
    pub dark_mode: bool,
}

fn default_dark_mode() -> bool {
    true
}

impl Default for Prefs {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// Loads and saves [`Prefs`] at a fixed path.
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PREFS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads preferences, returning defaults when the file is absent or unreadable.
    pub fn load(&self) -> Prefs {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(prefs) => prefs,
                Err(e) => {
                    log::warn!(
                        "Malformed preferences at {}, using defaults: {}",
                        self.path.display(),
                        e
                    );
                    Prefs::default()
                }
            },
            Err(_) => Prefs::default(),
        }
    }

    pub fn save(&self, prefs: &Prefs) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PrefsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json).map_err(|source| PrefsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_defaults_to_dark() {
        let dir = TempDir::new().unwrap();
        let store = PrefStore::new(dir.path());
        assert!(store.load().dark_mode);
    }

    #[test]
    fn test_save_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = PrefStore::new(dir.path());
        store.save(&Prefs { dark_mode: false }).unwrap();
        assert!(!store.load().dark_mode);
    }

    #[test]
    fn test_saved_file_uses_well_known_key() {
        let dir = TempDir::new().unwrap();
        let store = PrefStore::new(dir.path());
        store.save(&Prefs { dark_mode: true }).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[DARK_MODE_KEY], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PrefStore::new(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().dark_mode);
    }

    #[test]
    fn test_missing_key_takes_default() {
        let dir = TempDir::new().unwrap();
        let store = PrefStore::new(dir.path());
        std::fs::write(store.path(), "{}").unwrap();
        assert!(store.load().dark_mode);
    }
}
