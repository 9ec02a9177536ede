//! Scene serialization, file I/O and autosave

use std::path::{Path, PathBuf};

use shared::Scene;

use super::{check_invariants, SceneState};
use crate::error::{EditorError, Result};

impl SceneState {
    /// Serialize the whole document as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.scene)?)
    }

    /// Parse and validate a document
    pub fn from_json(json: &str) -> Result<Scene> {
        let scene: Scene = serde_json::from_str(json)?;
        check_invariants(&scene)?;
        Ok(scene)
    }

    /// Write the document to `path` and mark it clean
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        self.mark_clean();
        tracing::info!("Saved scene '{}' to {}", self.scene.name, path.display());
        Ok(())
    }

    /// Load and validate a document from `path`, replacing the current one
    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&json)?;
        tracing::info!(
            "Loaded scene '{}' ({} objects) from {}",
            scene.name,
            scene.objects.len(),
            path.display()
        );
        self.set_scene(scene);
        Ok(())
    }

    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "scene-editor", "scene-editor")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save scene to autosave file
    pub fn autosave(&self) -> Result<PathBuf> {
        let path = Self::autosave_path().ok_or(EditorError::NoDataDir)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.to_json()?)?;
        tracing::debug!("Autosaved to {}", path.display());
        Ok(path)
    }

    /// Load scene from autosave file
    pub fn load_autosave() -> Option<Scene> {
        let path = Self::autosave_path()?;
        let json = std::fs::read_to_string(&path).ok()?;
        match Self::from_json(&json) {
            Ok(scene) => Some(scene),
            Err(e) => {
                tracing::warn!("Ignoring autosave at {}: {e}", path.display());
                None
            }
        }
    }

    /// Check if autosave file exists
    pub fn has_autosave() -> bool {
        Self::autosave_path().map(|p| p.exists()).unwrap_or(false)
    }
}
