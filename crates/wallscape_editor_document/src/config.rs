// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.
//!
//! Preferences that outlive any single project: undo depth, default
//! timeline and canvas settings for new projects, and the autosave
//! toggle. Stored as RON next to the editor installation.

use crate::history::DEFAULT_HISTORY_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use wallscape_editor_scene::{ProjectMeta, DEFAULT_BACKGROUND};
use wallscape_editor_timeline::{DEFAULT_DURATION, DEFAULT_FPS};

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "editor.wallscape";

/// Errors from reading or writing the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Configuration could not be encoded
    #[error("Config encode error: {0}")]
    Encode(#[from] ron::Error),

    /// Configuration was written by a newer editor
    #[error("Config version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Newest version this build understands
        supported: u32,
    },
}

/// Canvas defaults applied to newly created projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDefaults {
    /// Canvas width in canvas units
    pub width: f32,
    /// Canvas height in canvas units
    pub height: f32,
    /// Background color (CSS color string)
    pub background: String,
}

impl Default for CanvasDefaults {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

/// Editor-level preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Configuration format version
    pub version: u32,
    /// Maximum undo depth
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    /// Whether persisted mutations save automatically
    #[serde(default = "default_autosave")]
    pub autosave: bool,
    /// Timeline duration for new projects, in seconds
    #[serde(default = "default_duration")]
    pub default_duration: f32,
    /// Advisory frame rate for new projects
    #[serde(default = "default_fps")]
    pub default_fps: f32,
    /// Canvas defaults for new projects
    #[serde(default)]
    pub canvas: CanvasDefaults,
}

fn default_history_depth() -> usize {
    DEFAULT_HISTORY_DEPTH
}

fn default_autosave() -> bool {
    true
}

fn default_duration() -> f32 {
    DEFAULT_DURATION
}

fn default_fps() -> f32 {
    DEFAULT_FPS
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            history_depth: DEFAULT_HISTORY_DEPTH,
            autosave: true,
            default_duration: DEFAULT_DURATION,
            default_fps: DEFAULT_FPS,
            canvas: CanvasDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: EditorConfig = ron::from_str(&content)?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_FORMAT_VERSION,
            });
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Metadata for a new project using the configured canvas defaults
    pub fn new_project_meta(&self, name: impl Into<String>) -> ProjectMeta {
        let mut meta = ProjectMeta::new(name, self.canvas.width, self.canvas.height);
        meta.background = self.canvas.background.clone();
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.history_depth, DEFAULT_HISTORY_DEPTH);
        assert!(config.autosave);
        assert_eq!(config.default_duration, DEFAULT_DURATION);
    }

    #[test]
    fn test_ron_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = EditorConfig {
            history_depth: 25,
            canvas: CanvasDefaults {
                background: "#0b1220".to_string(),
                ..CanvasDefaults::default()
            },
            ..EditorConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = EditorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = EditorConfig {
            version: CONFIG_FORMAT_VERSION + 1,
            ..EditorConfig::default()
        };
        config.save(&path).unwrap();

        assert!(matches!(
            EditorConfig::load(&path),
            Err(ConfigError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_new_project_meta_uses_canvas_defaults() {
        let config = EditorConfig {
            canvas: CanvasDefaults {
                width: 1920.0,
                height: 1080.0,
                background: "#101014".to_string(),
            },
            ..EditorConfig::default()
        };
        let meta = config.new_project_meta("Nebula");
        assert_eq!(meta.name, "Nebula");
        assert_eq!(meta.width, 1920.0);
        assert_eq!(meta.height, 1080.0);
        assert_eq!(meta.background, "#101014");
    }
}
