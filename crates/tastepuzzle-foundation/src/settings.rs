//! Persisted application settings.
//!
//! A single explicit value injected into components at construction.
//! Persisted as JSON under the platform config directory
//! (`<config>/PuzzleVkusov/AppSettings.json`); unknown or missing fields
//! fall back to the documented defaults, so old files keep loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings store organization, kept from the original application.
pub const ORGANIZATION: &str = "PuzzleVkusov";
/// Settings store application name.
pub const APPLICATION: &str = "AppSettings";

/// User-tunable application settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base font size in pixels. Default 14.
    pub font_size: u32,
    /// Section/title font size in pixels. Default 16.
    pub title_font_size: u32,
    /// Whether recipe cards show their image area. Default true.
    pub show_images: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 14,
            title_font_size: 16,
            show_images: true,
        }
    }
}

impl Settings {
    /// The platform path of the settings file, when a config directory
    /// exists at all.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(ORGANIZATION)
                .join(format!("{}.json", APPLICATION))
        })
    }

    /// Loads from the default path. Any failure (no config dir, missing
    /// file, bad JSON) falls back to defaults — settings must never keep
    /// the application from starting.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("no config directory; using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("failed to load settings from {:?}: {:#}", path, err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_path().context("No config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings file: {:?}", path))?;
        log::info!("settings saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.font_size, 14);
        assert_eq!(settings.title_font_size, 16);
        assert!(settings.show_images);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AppSettings.json");

        let settings = Settings {
            font_size: 18,
            title_font_size: 22,
            show_images: false,
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AppSettings.json");
        std::fs::write(&path, r#"{ "font_size": 20 }"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.font_size, 20);
        assert_eq!(loaded.title_font_size, 16);
    }
}
