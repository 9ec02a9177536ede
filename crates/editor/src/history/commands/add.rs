use shared::{NewObject, ObjectId};

use crate::history::Command;
use crate::state::EditorState;

/// Add one object. The id assigned on first execute is reused on redo.
#[derive(Debug, Clone)]
pub struct AddObject {
    spec: NewObject,
    created: Option<ObjectId>,
}

impl AddObject {
    pub fn new(spec: NewObject) -> Self {
        Self {
            spec,
            created: None,
        }
    }

    /// Id of the object created by the last execute
    pub fn created_id(&self) -> Option<&ObjectId> {
        self.created.as_ref()
    }
}

impl Command for AddObject {
    type Target = EditorState;

    fn name(&self) -> &str {
        "Add Object"
    }

    fn execute(&mut self, state: &mut EditorState) {
        let mut spec = self.spec.clone();
        if spec.id.is_none() {
            spec.id = self.created.clone();
        }
        self.created = state.scene.add_object(spec);
        if let Some(id) = &self.created {
            // Pin the id so redo recreates the same object
            self.spec.id = Some(id.clone());
        }
    }

    fn undo(&mut self, state: &mut EditorState) {
        if let Some(id) = &self.created {
            state.scene.remove_object(id);
            state.selection.deselect([id]);
        }
    }
}
