use shared::{MaterialProps, MaterialSpec, MaterialType, ObjectId};

use crate::history::{Command, MergeOutcome};
use crate::state::EditorState;

/// Current inline material of a mesh; `None` when the object has no mesh
fn current_material(state: &EditorState, id: &str) -> Option<Option<MaterialSpec>> {
    state
        .scene
        .get(id)
        .and_then(|o| o.components.mesh.as_ref())
        .map(|mesh| mesh.material.clone())
}

/// Edit material properties of a mesh.
///
/// Consecutive edits of the same object coalesce into one entry whose undo
/// returns to the material before the first edit.
#[derive(Debug, Clone)]
pub struct UpdateMaterialProps {
    object_id: ObjectId,
    changes: MaterialProps,
    /// Material before execute; `Some(None)` means none was set
    before: Option<Option<MaterialSpec>>,
}

impl UpdateMaterialProps {
    pub fn new(object_id: impl Into<ObjectId>, changes: MaterialProps) -> Self {
        Self {
            object_id: object_id.into(),
            changes,
            before: None,
        }
    }

    pub fn changes(&self) -> &MaterialProps {
        &self.changes
    }
}

impl Command for UpdateMaterialProps {
    type Target = EditorState;

    fn name(&self) -> &str {
        "Update Material Props"
    }

    fn execute(&mut self, state: &mut EditorState) {
        self.before = current_material(state, &self.object_id);
        let Some(current) = &self.before else {
            tracing::debug!("Material edit skipped: {} has no mesh", self.object_id);
            return;
        };
        let after = current.clone().unwrap_or_default().with_props(&self.changes);
        state.scene.update_mesh_material_spec(&self.object_id, Some(after));
    }

    fn undo(&mut self, state: &mut EditorState) {
        if let Some(before) = self.before.clone() {
            state.scene.update_mesh_material_spec(&self.object_id, before);
        }
    }

    fn try_merge(&mut self, next: &Self) -> MergeOutcome {
        if next.object_id != self.object_id || self.before.is_none() {
            return MergeOutcome::NotMerged;
        }
        for (key, value) in &next.changes {
            self.changes.insert(key.clone(), value.clone());
        }
        MergeOutcome::Merged
    }
}

/// Switch a mesh to another material type, keeping the props the new type
/// understands and filling in its defaults.
#[derive(Debug, Clone)]
pub struct ChangeMaterialType {
    object_id: ObjectId,
    kind: MaterialType,
    before: Option<Option<MaterialSpec>>,
}

impl ChangeMaterialType {
    pub fn new(object_id: impl Into<ObjectId>, kind: MaterialType) -> Self {
        Self {
            object_id: object_id.into(),
            kind,
            before: None,
        }
    }
}

impl Command for ChangeMaterialType {
    type Target = EditorState;

    fn name(&self) -> &str {
        "Change Material Type"
    }

    fn execute(&mut self, state: &mut EditorState) {
        self.before = current_material(state, &self.object_id);
        let Some(current) = &self.before else {
            tracing::debug!("Material type change skipped: {} has no mesh", self.object_id);
            return;
        };
        let after = current.clone().unwrap_or_default().converted_to(self.kind);
        state.scene.update_mesh_material_spec(&self.object_id, Some(after));
    }

    fn undo(&mut self, state: &mut EditorState) {
        if let Some(before) = self.before.clone() {
            state.scene.update_mesh_material_spec(&self.object_id, before);
        }
    }
}
