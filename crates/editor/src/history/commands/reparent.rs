use shared::ObjectId;

use crate::error::{EditorError, Result};
use crate::history::Command;
use crate::state::{has_circular_dependency, EditorState, SceneState};

/// Move an object under a new parent
#[derive(Debug, Clone)]
pub struct ReparentObject {
    object_id: ObjectId,
    new_parent: ObjectId,
    index: Option<usize>,
    /// Parent and sibling index before execute
    old: Option<(ObjectId, Option<usize>)>,
}

impl ReparentObject {
    /// Build a reparent command.
    ///
    /// Moving the root or naming an unknown object or parent yields
    /// `Ok(None)`: there is nothing to record. Moves that would create a
    /// cycle fail with [`EditorError::CircularDependency`].
    pub fn new(
        scene: &SceneState,
        object_id: impl Into<ObjectId>,
        new_parent: impl Into<ObjectId>,
        index: Option<usize>,
    ) -> Result<Option<Self>> {
        let object_id = object_id.into();
        let new_parent = new_parent.into();
        if object_id == *scene.root() {
            tracing::debug!("reparent: root cannot be moved");
            return Ok(None);
        }
        if !scene.contains(&object_id) || !scene.contains(&new_parent) {
            tracing::debug!("reparent: {object_id} or {new_parent} not found");
            return Ok(None);
        }
        if has_circular_dependency(&scene.scene().objects, &object_id, &new_parent) {
            return Err(EditorError::CircularDependency {
                id: object_id,
                new_parent,
            });
        }
        Ok(Some(Self {
            object_id,
            new_parent,
            index,
            old: None,
        }))
    }
}

impl Command for ReparentObject {
    type Target = EditorState;

    fn name(&self) -> &str {
        "Reparent"
    }

    fn execute(&mut self, state: &mut EditorState) {
        let scene = &mut state.scene;
        self.old = scene
            .get(&self.object_id)
            .and_then(|o| o.parent_id.clone())
            .map(|pid| (pid, scene.index_in_parent(&self.object_id)));

        if let Err(e) = scene.reparent(&self.object_id, &self.new_parent, self.index) {
            // The tree changed since construction; leave it as is.
            tracing::warn!("Reparent skipped: {e}");
            self.old = None;
        }
    }

    fn undo(&mut self, state: &mut EditorState) {
        let Some((parent, index)) = &self.old else {
            return;
        };
        if let Err(e) = state.scene.reparent(&self.object_id, parent, *index) {
            tracing::warn!("Reparent undo failed: {e}");
        }
    }
}
