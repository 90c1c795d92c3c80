//! Editor preferences and persistent settings
//!
//! Preferences are stored as TOML in the platform config directory:
//! - Windows: %APPDATA%/levelkit/
//! - Linux: ~/.config/levelkit/
//! - macOS: ~/Library/Application Support/levelkit/

use directories::ProjectDirs;
use levelkit_codec::atomic_write;
use levelkit_core::{LevelError, DEFAULT_LAYER, DEFAULT_TILE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::LevelDocument;

/// Maximum number of recent level files to track
pub const MAX_RECENT_FILES: usize = 10;

/// File name inside the config directory
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Errors from reading or writing preferences
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("No config directory available on this platform")]
    NoConfigDir,
}

/// Editor preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[serde(default)]
pub struct EditorPreferences {
    /// Version for future migrations
    pub version: u32,

    pub snap_to_grid: bool,
    /// Tile size used when opening level files, which do not store it
    pub default_tile_size: u32,
    pub default_layer: usize,
    /// Type registry config, relative to the working directory
    pub registry_path: PathBuf,

    /// Most recent first
    pub recent_files: Vec<RecentFile>,
}

/// A recent level file entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFile {
    pub path: String,
    pub last_opened: u64, // Unix timestamp
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            version: 1,
            snap_to_grid: true,
            default_tile_size: DEFAULT_TILE_SIZE,
            default_layer: DEFAULT_LAYER,
            registry_path: PathBuf::from("types.cfg"),
            recent_files: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Location of the preferences file, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "levelkit").map(|dirs| dirs.config_dir().join(PREFERENCES_FILE))
    }

    /// Load preferences, falling back to defaults when missing or unreadable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("No config directory, using default preferences");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!("Failed to load preferences from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save to the platform config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::config_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        atomic_write(path, content.as_bytes())?;
        info!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Add a level file to the recent list
    pub fn add_recent_file(&mut self, path: impl AsRef<Path>) {
        use std::time::{SystemTime, UNIX_EPOCH};

        let path = path.as_ref().to_string_lossy().to_string();

        // Remove if already exists (will re-add at front)
        self.recent_files.retain(|f| f.path != path);

        self.recent_files.insert(
            0,
            RecentFile {
                path,
                last_opened: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0),
            },
        );
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// Remove a file from the recent list (e.g., if it no longer exists)
    pub fn remove_recent_file(&mut self, path: &str) {
        self.recent_files.retain(|f| f.path != path);
    }

    pub fn last_file(&self) -> Option<&RecentFile> {
        self.recent_files.first()
    }

    pub fn clear_recent_files(&mut self) {
        self.recent_files.clear();
    }

    /// Apply the editing defaults to a document
    pub fn configure(&self, document: &mut LevelDocument) -> Result<(), LevelError> {
        document.set_snap_to_grid(self.snap_to_grid);
        document.set_current_layer(self.default_layer)
    }
}
