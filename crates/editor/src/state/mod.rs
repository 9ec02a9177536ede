pub mod scene;
pub mod selection;
pub mod settings;
pub mod sync;

pub use scene::{
    check_invariants, has_circular_dependency, new_default_scene, new_empty_scene,
    object_display_name, outline, short_id, type_icon, SceneState,
};
pub use selection::SelectionState;
pub use settings::{AutosaveSettings, EditorSettings, HistorySettings, NewSceneSettings};
pub use sync::sync_selection;

/// Document plus selection: everything a command may mutate
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub scene: SceneState,
    pub selection: SelectionState,
}

impl EditorState {
    pub fn new(scene: SceneState) -> Self {
        Self {
            scene,
            selection: SelectionState::default(),
        }
    }

    /// Drop selection entries whose objects are gone
    pub fn sync_selection(&mut self) -> Vec<shared::ObjectId> {
        sync_selection(&self.scene, &mut self.selection)
    }
}
