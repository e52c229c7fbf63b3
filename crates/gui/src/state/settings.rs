//! Viewer settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ViewerError;

/// Camera control settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSettings {
    /// Movement speed, units per second
    pub move_sensitivity: f64,
    /// Rotation speed, radians per second
    pub rotate_sensitivity: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            move_sensitivity: 3.0,
            rotate_sensitivity: 1.2,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Edge stroke width in points
    pub line_width: f32,
    /// Show camera position overlay
    pub show_hud: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [18, 18, 24],
            line_width: 1.5,
            show_hud: true,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    /// Interface language: "ru" or "en"
    pub language: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: "ru".to_string(),
        }
    }
}

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub controls: ControlSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub ui: UiSettings,
    /// Preset opened last time
    #[serde(default)]
    pub last_scene: Option<String>,
}

impl ViewerSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "anaview", "anaview")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the config dir, or return default if not found
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::debug!("Using default settings: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ViewerError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Changed since `saved` and no slider or drag is in progress
    pub fn needs_save(&self, saved: &ViewerSettings, pointer_down: bool) -> bool {
        !pointer_down && self != saved
    }

    /// Save settings to the config dir
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::error!("Failed to save settings: {e}");
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ViewerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
