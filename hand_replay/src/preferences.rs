//! Persisted viewer preferences.

use crate::geometry::AmountFormat;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Failed to save preferences to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// Display preferences that survive restarts.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Preferences {
    pub amount_format: AmountFormat,
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// A missing or unreadable file yields the defaults, so a broken
    /// preferences file never keeps the viewer from starting.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No preferences at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Failed to read preferences {}: {err}", path.display());
                return Self::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|err| {
            log::warn!("Ignoring invalid preferences {}: {err}", path.display());
            Self::default()
        })
    }

    /// Write preferences to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let path = path.as_ref();
        let io_error = |source| PreferencesError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_error)?;

        log::debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Switch between big-blind and currency amounts. Returns the new format.
    pub fn toggle_amount_format(&mut self) -> AmountFormat {
        self.amount_format = self.amount_format.toggled();
        self.amount_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences::load(dir.path().join("missing.json"));
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.amount_format, AmountFormat::Bb);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Preferences::load(&path), Preferences::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dir").join("prefs.json");

        let mut prefs = Preferences::default();
        assert_eq!(prefs.toggle_amount_format(), AmountFormat::Eur);
        prefs.save(&path).unwrap();

        assert_eq!(Preferences::load(&path).amount_format, AmountFormat::Eur);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"amount_format":"eur","theme":"dark"}"#).unwrap();
        assert_eq!(Preferences::load(&path).amount_format, AmountFormat::Eur);
    }

    #[test]
    fn test_toggle_round_trips() {
        let mut prefs = Preferences::default();
        prefs.toggle_amount_format();
        assert_eq!(prefs.toggle_amount_format(), AmountFormat::Bb);
    }
}
