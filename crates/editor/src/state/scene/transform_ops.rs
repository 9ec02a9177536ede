//! Transform and component updates

use shared::{ComponentKind, ComponentPatch, ComponentValue, MaterialSpec, TransformPatch, TwinStatus};

use super::SceneState;

impl SceneState {
    /// Shallow-merge a transform patch into an object. Unknown ids are ignored.
    pub fn update_transform(&mut self, id: &str, patch: &TransformPatch) {
        let Some(object) = self.get_mut(id) else {
            tracing::debug!("update_transform: {id} not found");
            return;
        };
        patch.apply_to(&mut object.transform);
        self.touch();
    }

    /// Shallow-merge a component patch into the matching slot, creating the
    /// slot from defaults if the object does not have it yet.
    pub fn update_component(&mut self, id: &str, patch: &ComponentPatch) {
        let Some(object) = self.get_mut(id) else {
            tracing::debug!("update_component: {id} not found");
            return;
        };
        patch.apply_to(&mut object.components);
        self.touch();
    }

    /// Put a captured component slot back verbatim (`None` empties it)
    pub fn restore_component(&mut self, id: &str, kind: ComponentKind, value: Option<ComponentValue>) {
        let Some(object) = self.get_mut(id) else {
            return;
        };
        object.components.restore_slot(kind, value);
        self.touch();
    }

    /// Replace the inline material of a mesh (`None` removes it).
    ///
    /// No-op returning false when the object is unknown or has no mesh.
    pub fn update_mesh_material_spec(&mut self, id: &str, spec: Option<MaterialSpec>) -> bool {
        let Some(mesh) = self.get_mut(id).and_then(|o| o.components.mesh.as_mut()) else {
            tracing::debug!("update_mesh_material_spec: {id} has no mesh");
            return false;
        };
        mesh.material = spec;
        self.touch();
        true
    }

    /// Feed a live status sample into every twin bound to `external_id`.
    ///
    /// Not undoable. Returns the number of objects updated.
    pub fn apply_twin_update(&mut self, external_id: &str, status: TwinStatus, timestamp: i64) -> usize {
        let mut updated = 0;
        for object in self.scene.objects.values_mut() {
            if let Some(twin) = object.components.twin.as_mut() {
                if twin.external_id == external_id {
                    twin.status = status;
                    twin.last_update = timestamp;
                    updated += 1;
                }
            }
        }
        if updated > 0 {
            self.touch();
        }
        updated
    }
}
