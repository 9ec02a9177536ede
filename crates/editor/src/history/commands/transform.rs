use shared::{ObjectId, Transform, TransformPatch};

use crate::history::{Command, MergeOutcome};
use crate::state::EditorState;

/// Patch one object's transform.
///
/// A command created with [`TransformObject::dragging`] stays open: the next
/// transform of the same object is folded into it, and the merged entry takes
/// over that command's open/closed state. A drag gesture therefore becomes one
/// undo entry once its final (closed) update arrives.
#[derive(Debug, Clone)]
pub struct TransformObject {
    object_id: ObjectId,
    /// Full transform before the first execute
    before: Option<Transform>,
    after: TransformPatch,
    open: bool,
}

impl TransformObject {
    pub fn new(object_id: impl Into<ObjectId>, after: TransformPatch) -> Self {
        Self {
            object_id: object_id.into(),
            before: None,
            after,
            open: false,
        }
    }

    /// Intermediate update of an ongoing gesture
    pub fn dragging(object_id: impl Into<ObjectId>, after: TransformPatch) -> Self {
        Self {
            open: true,
            ..Self::new(object_id, after)
        }
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Combined patch applied by this entry
    pub fn patch(&self) -> &TransformPatch {
        &self.after
    }
}

impl Command for TransformObject {
    type Target = EditorState;

    fn name(&self) -> &str {
        "Transform"
    }

    fn execute(&mut self, state: &mut EditorState) {
        if self.before.is_none() {
            self.before = state.scene.get(&self.object_id).map(|o| o.transform.clone());
        }
        state.scene.update_transform(&self.object_id, &self.after);
    }

    fn undo(&mut self, state: &mut EditorState) {
        if let Some(before) = &self.before {
            state
                .scene
                .update_transform(&self.object_id, &TransformPatch::full(before));
        }
    }

    fn try_merge(&mut self, next: &Self) -> MergeOutcome {
        if !self.open || next.object_id != self.object_id {
            return MergeOutcome::NotMerged;
        }
        self.after.absorb(&next.after);
        self.open = next.open;
        MergeOutcome::Merged
    }
}
