use shared::{ComponentPatch, ComponentValue, ObjectId};

use crate::history::{Command, MergeOutcome};
use crate::state::EditorState;

/// Patch one component slot of an object.
///
/// Built with [`UpdateComponent::dragging`] the command stays open and
/// absorbs following patches of the same slot, like a transform drag.
#[derive(Debug, Clone)]
pub struct UpdateComponent {
    object_id: ObjectId,
    patch: ComponentPatch,
    /// Slot value before execute; `Some(None)` means the slot was empty
    before: Option<Option<ComponentValue>>,
    open: bool,
}

impl UpdateComponent {
    pub fn new(object_id: impl Into<ObjectId>, patch: ComponentPatch) -> Self {
        Self {
            object_id: object_id.into(),
            patch,
            before: None,
            open: false,
        }
    }

    /// Intermediate update of an ongoing edit (slider drag)
    pub fn dragging(object_id: impl Into<ObjectId>, patch: ComponentPatch) -> Self {
        Self {
            open: true,
            ..Self::new(object_id, patch)
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Command for UpdateComponent {
    type Target = EditorState;

    fn name(&self) -> &str {
        "Update Component"
    }

    fn execute(&mut self, state: &mut EditorState) {
        let kind = self.patch.kind();
        self.before = state
            .scene
            .get(&self.object_id)
            .map(|o| o.components.slot(kind));
        state.scene.update_component(&self.object_id, &self.patch);
    }

    fn undo(&mut self, state: &mut EditorState) {
        let Some(before) = self.before.clone() else {
            return;
        };
        state
            .scene
            .restore_component(&self.object_id, self.patch.kind(), before);
    }

    fn try_merge(&mut self, next: &Self) -> MergeOutcome {
        if !self.open || next.object_id != self.object_id || !self.patch.absorb(&next.patch) {
            return MergeOutcome::NotMerged;
        }
        self.open = next.open;
        MergeOutcome::Merged
    }
}
