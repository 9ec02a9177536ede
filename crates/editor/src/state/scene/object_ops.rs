//! Object CRUD operations

use shared::{NewObject, ObjectId, ObjectType, Scene, SceneObject};

use super::SceneState;

impl SceneState {
    /// Insert a new object, filling defaults for missing fields.
    ///
    /// The parent defaults to the root. Returns `None` without touching the
    /// scene when the parent is unknown or the requested id is taken.
    pub fn add_object(&mut self, spec: NewObject) -> Option<ObjectId> {
        let parent_id = spec.parent_id.unwrap_or_else(|| self.scene.root.clone());
        if !self.contains(&parent_id) {
            tracing::debug!("add_object: parent {parent_id} not found");
            return None;
        }

        let id = spec.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        if self.contains(&id) {
            tracing::warn!("add_object: id {id} already in use");
            return None;
        }

        let object = SceneObject {
            id: id.clone(),
            name: spec.name.unwrap_or_else(|| "New Object".to_string()),
            object_type: spec.object_type.unwrap_or(ObjectType::Mesh),
            parent_id: Some(parent_id.clone()),
            children: Vec::new(),
            visible: spec.visible.unwrap_or(true),
            locked: spec.locked.unwrap_or(false),
            transform: spec.transform.unwrap_or_default(),
            components: spec.components,
        };

        self.scene.objects.insert(id.clone(), object);
        if let Some(parent) = self.get_mut(&parent_id) {
            parent.children.push(id.clone());
        }

        self.touch();
        Some(id)
    }

    /// Remove an object and its whole subtree in one step.
    ///
    /// Returns the removed ids (pre-order). The root and unknown ids are
    /// ignored.
    pub fn remove_object(&mut self, id: &str) -> Vec<ObjectId> {
        if id == self.scene.root {
            tracing::debug!("remove_object: root is not removable");
            return Vec::new();
        }
        let Some(parent_id) = self.get(id).map(|o| o.parent_id.clone()) else {
            return Vec::new();
        };

        let removed = self.subtree(id);

        let parent = parent_id
            .as_deref()
            .and_then(|pid| self.scene.objects.get_mut(pid));
        if let Some(parent) = parent {
            parent.children.retain(|c| c != id);
        }
        for rid in &removed {
            self.scene.objects.remove(rid);
        }

        self.touch();
        removed
    }

    /// Reinsert a captured object verbatim, appending it to its parent's
    /// children if it is not listed there yet.
    pub fn restore_object(&mut self, object: SceneObject) {
        self.restore_object_at(object, None);
    }

    /// Reinsert a captured object verbatim at a sibling index (clamped).
    ///
    /// No cycle validation: only used to revert a previous removal.
    pub fn restore_object_at(&mut self, object: SceneObject, index: Option<usize>) {
        let id = object.id.clone();
        let parent_id = object.parent_id.clone();
        self.scene.objects.insert(id.clone(), object);

        let parent = parent_id
            .as_deref()
            .and_then(|pid| self.scene.objects.get_mut(pid));
        if let Some(parent) = parent {
            if !parent.children.contains(&id) {
                match index {
                    Some(i) => {
                        let i = i.min(parent.children.len());
                        parent.children.insert(i, id);
                    }
                    None => parent.children.push(id),
                }
            }
        }

        self.touch();
    }

    /// Rename an object
    pub fn rename_object(&mut self, id: &str, name: String) -> bool {
        let Some(object) = self.get_mut(id) else {
            return false;
        };
        object.name = name;
        self.touch();
        true
    }

    /// Set object visibility
    pub fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(object) = self.get_mut(id) {
            if object.visible != visible {
                object.visible = visible;
                self.touch();
            }
        }
    }

    /// Lock or unlock an object for editing
    pub fn set_locked(&mut self, id: &str, locked: bool) {
        if let Some(object) = self.get_mut(id) {
            if object.locked != locked {
                object.locked = locked;
                self.touch();
            }
        }
    }

    /// Replace the whole document (load). The new document starts clean.
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.version += 1;
        self.dirty = false;
    }

    /// Replace the document with a root-only scene
    pub fn clear(&mut self) {
        let name = self.scene.name.clone();
        self.scene = super::new_empty_scene(&name);
        self.touch();
    }
}
