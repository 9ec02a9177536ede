//! Headless editor session for programmatic scene manipulation.
//!
//! Owns the document, the selection, the undo history and the settings, and
//! routes every undoable edit through the history.

use std::path::PathBuf;

use shared::{
    ComponentPatch, MaterialProps, MaterialType, NewObject, ObjectId, Scene, Transform,
    TransformPatch, TwinStatus,
};

use crate::error::Result;
use crate::history::{
    AddObject, ChangeMaterialType, DeleteObjects, EditorCommand, History, RenameObject,
    ReparentObject, TransformObject, UpdateComponent, UpdateMaterialProps,
};
use crate::shortcuts::{Modifiers, ShortcutActionType, ShortcutRegistry};
use crate::state::{
    new_default_scene, new_empty_scene, EditorSettings, EditorState, SceneState,
};

/// Headless editor: scene, selection, history, settings and shortcuts
#[derive(Debug)]
pub struct EditorHarness {
    pub state: EditorState,
    pub history: History<EditorCommand>,
    pub settings: EditorSettings,
    pub shortcuts: ShortcutRegistry,
}

impl EditorHarness {
    /// Create a harness with default settings and a root-only scene.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            state: EditorState::default(),
            history: History::with_max_entries(settings.history.max_entries),
            settings,
            shortcuts: ShortcutRegistry::default(),
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.state.scene
    }

    // ── Commands ──────────────────────────────────────────────

    /// Execute a command through the history
    pub fn submit(&mut self, command: impl Into<EditorCommand>) {
        self.history.execute(command.into(), &mut self.state);
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.state)
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.state)
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add an object (undoable). Returns `None` without recording anything
    /// when the parent is unknown or the id is taken.
    pub fn add_object(&mut self, mut spec: NewObject) -> Option<ObjectId> {
        let scene = &self.state.scene;
        let parent_ok = spec.parent_id.as_deref().map_or(true, |p| scene.contains(p));
        if !parent_ok || spec.id.as_deref().is_some_and(|id| scene.contains(id)) {
            return None;
        }
        let id = spec
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();
        self.submit(AddObject::new(spec));
        Some(id)
    }

    /// Delete objects and their subtrees (undoable)
    pub fn delete<S: AsRef<str>>(&mut self, ids: &[S]) {
        let ids: Vec<ObjectId> = ids.iter().map(|s| s.as_ref().to_string()).collect();
        self.submit(DeleteObjects::new(ids));
    }

    /// Delete the current selection (undoable). No-op when nothing is selected.
    pub fn delete_selection(&mut self) -> bool {
        if self.state.selection.is_empty() {
            return false;
        }
        let ids = self.state.selection.all().to_vec();
        self.submit(DeleteObjects::new(ids));
        true
    }

    /// Remove objects straight from the store, bypassing history, then prune
    /// the selection.
    pub fn delete_immediate<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<ObjectId> {
        let mut removed = Vec::new();
        for id in ids {
            removed.extend(self.state.scene.remove_object(id.as_ref()));
        }
        self.state.sync_selection();
        removed
    }

    /// Apply a finished transform edit (its own undo entry, or closes a drag)
    pub fn transform(&mut self, id: &str, patch: TransformPatch) {
        self.submit(TransformObject::new(id, patch));
    }

    /// Apply an intermediate drag update; consecutive updates coalesce until
    /// the next [`transform`](Self::transform) call for the same object.
    pub fn drag(&mut self, id: &str, patch: TransformPatch) {
        self.submit(TransformObject::dragging(id, patch));
    }

    /// Reset transforms of the selected objects to identity (undoable)
    pub fn reset_transform(&mut self) {
        let ids = self.state.selection.all().to_vec();
        let identity = TransformPatch::full(&Transform::new());
        for id in ids {
            self.submit(TransformObject::new(id, identity.clone()));
        }
    }

    /// Move an object under a new parent (undoable). Moving the root or an
    /// unknown id records nothing.
    pub fn reparent(&mut self, id: &str, new_parent: &str, index: Option<usize>) -> Result<()> {
        if let Some(command) = ReparentObject::new(&self.state.scene, id, new_parent, index)? {
            self.submit(command);
        }
        Ok(())
    }

    pub fn update_component(&mut self, id: &str, patch: ComponentPatch) {
        self.submit(UpdateComponent::new(id, patch));
    }

    /// Intermediate component update; coalesces like [`drag`](Self::drag)
    pub fn drag_component(&mut self, id: &str, patch: ComponentPatch) {
        self.submit(UpdateComponent::dragging(id, patch));
    }

    fn has_mesh(&self, id: &str) -> bool {
        self.state
            .scene
            .get(id)
            .is_some_and(|o| o.components.mesh.is_some())
    }

    /// Edit inline material props of a mesh (undoable, consecutive edits
    /// coalesce). Returns false without recording when there is no mesh.
    pub fn update_material_props(&mut self, id: &str, changes: MaterialProps) -> bool {
        if !self.has_mesh(id) {
            return false;
        }
        self.submit(UpdateMaterialProps::new(id, changes));
        true
    }

    /// Switch a mesh's material type (undoable)
    pub fn change_material_type(&mut self, id: &str, kind: MaterialType) -> bool {
        if !self.has_mesh(id) {
            return false;
        }
        self.submit(ChangeMaterialType::new(id, kind));
        true
    }

    pub fn rename(&mut self, id: &str, name: &str) {
        self.submit(RenameObject::new(id, name));
    }

    /// Live digital-twin sample; not recorded in history
    pub fn apply_twin_update(&mut self, external_id: &str, status: TwinStatus, timestamp: i64) -> usize {
        self.state.scene.apply_twin_update(external_id, status, timestamp)
    }

    // ── Selection ─────────────────────────────────────────────

    pub fn select<S: AsRef<str>>(&mut self, ids: &[S], append: bool) {
        self.state
            .selection
            .select(ids.iter().map(|s| s.as_ref().to_string()), append);
    }

    pub fn deselect<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.state.selection.deselect(ids);
    }

    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// Select every object except the root, in tree order
    pub fn select_all(&mut self) {
        let root = self.state.scene.root().clone();
        let ids = self.state.scene.descendants(&root);
        self.state.selection.select(ids, false);
    }

    pub fn selected(&self) -> &[ObjectId] {
        self.state.selection.all()
    }

    // ── Shortcuts ─────────────────────────────────────────────

    /// Handle a key press. Returns true when a shortcut ran.
    pub fn press(&mut self, modifiers: Modifiers, code: &str) -> bool {
        let Some(shortcut) = self.shortcuts.resolve(modifiers, code).copied() else {
            return false;
        };
        if shortcut.requires_selection && self.state.selection.is_empty() {
            tracing::debug!("Shortcut {code} skipped: nothing selected");
            return false;
        }
        match shortcut.action {
            ShortcutActionType::Delete => {
                self.delete_selection();
            }
            ShortcutActionType::DeleteImmediate => {
                let ids = self.state.selection.all().to_vec();
                self.delete_immediate(&ids);
            }
            ShortcutActionType::SelectAll => self.select_all(),
            ShortcutActionType::Undo => {
                self.undo();
            }
            ShortcutActionType::Redo => {
                self.redo();
            }
            ShortcutActionType::ResetTransform => self.reset_transform(),
        }
        true
    }

    // ── Documents ─────────────────────────────────────────────

    /// Replace the document; history and selection start over
    pub fn load_scene(&mut self, scene: Scene) {
        self.state.scene.set_scene(scene);
        self.state.selection.clear();
        self.history.clear();
    }

    /// Load a validated scene from JSON
    pub fn load_scene_json(&mut self, json: &str) -> Result<()> {
        let scene = SceneState::from_json(json)?;
        self.load_scene(scene);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> Result<String> {
        self.state.scene.to_json()
    }

    /// Start a new document from the configured defaults
    pub fn new_scene(&mut self, name: Option<&str>) {
        let defaults = &self.settings.new_scene;
        let name = name.unwrap_or(&defaults.name);
        let scene = if defaults.with_default_camera_and_light {
            new_default_scene(name, &defaults.scene_settings())
        } else {
            let mut scene = new_empty_scene(name);
            scene.settings = defaults.scene_settings();
            scene
        };
        self.load_scene(scene);
    }

    /// Write the autosave file if enabled and there are unsaved changes
    pub fn autosave(&self) -> Result<Option<PathBuf>> {
        if !self.settings.autosave.enabled || !self.state.scene.is_dirty() {
            return Ok(None);
        }
        self.state.scene.autosave().map(Some)
    }

    /// Reload the last autosave. Returns false if there is none.
    pub fn restore_autosave(&mut self) -> bool {
        match SceneState::load_autosave() {
            Some(scene) => {
                self.load_scene(scene);
                true
            }
            None => false,
        }
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of objects including the root
    pub fn object_count(&self) -> usize {
        self.state.scene.object_count()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}
