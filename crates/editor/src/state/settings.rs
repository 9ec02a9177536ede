//! Editor settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::SceneSettings;

use crate::error::{EditorError, Result};

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo entries kept; the oldest is dropped beyond this
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

/// Autosave settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveSettings {
    pub enabled: bool,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Defaults for newly created documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSceneSettings {
    pub name: String,
    pub environment: String,
    pub grid_visible: bool,
    pub background_color: String,
    /// Seed new documents with a camera and a directional light
    pub with_default_camera_and_light: bool,
}

impl Default for NewSceneSettings {
    fn default() -> Self {
        let scene = SceneSettings::default();
        Self {
            name: "New Scene".to_string(),
            environment: scene.environment,
            grid_visible: scene.grid_visible,
            background_color: scene.background_color,
            with_default_camera_and_light: true,
        }
    }
}

impl NewSceneSettings {
    /// Scene-level settings stamped onto new documents
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            environment: self.environment.clone(),
            grid_visible: self.grid_visible,
            background_color: self.background_color.clone(),
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub autosave: AutosaveSettings,
    #[serde(default)]
    pub new_scene: NewSceneSettings,
}

impl EditorSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "scene-editor", "scene-editor")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Falling back to default settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(EditorError::NoDataDir)?;
        self.save_to(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EditorSettings::default();
        assert_eq!(s.history.max_entries, 100);
        assert!(s.autosave.enabled);
        assert!(s.new_scene.with_default_camera_and_light);
        assert_eq!(s.new_scene.scene_settings(), SceneSettings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: EditorSettings = serde_json::from_str(r#"{"history":{"max_entries":5}}"#).unwrap();
        assert_eq!(s.history.max_entries, 5);
        assert!(s.autosave.enabled);
        assert_eq!(s.new_scene.name, "New Scene");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!("settings-{}.json", uuid::Uuid::new_v4()));
        let mut s = EditorSettings::default();
        s.autosave.enabled = false;
        s.new_scene.name = "Factory Floor".to_string();
        s.save_to(&path).unwrap();

        let loaded = EditorSettings::load_from(&path).unwrap();
        assert_eq!(loaded, s);
        let _ = std::fs::remove_file(&path);
    }
}
