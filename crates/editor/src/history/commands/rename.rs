use shared::ObjectId;

use crate::history::Command;
use crate::state::EditorState;

#[derive(Debug, Clone)]
pub struct RenameObject {
    object_id: ObjectId,
    name: String,
    old_name: Option<String>,
}

impl RenameObject {
    pub fn new(object_id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            name: name.into(),
            old_name: None,
        }
    }
}

impl Command for RenameObject {
    type Target = EditorState;

    fn name(&self) -> &str {
        "Rename"
    }

    fn execute(&mut self, state: &mut EditorState) {
        self.old_name = state.scene.get(&self.object_id).map(|o| o.name.clone());
        state.scene.rename_object(&self.object_id, self.name.clone());
    }

    fn undo(&mut self, state: &mut EditorState) {
        if let Some(old) = &self.old_name {
            state.scene.rename_object(&self.object_id, old.clone());
        }
    }
}
