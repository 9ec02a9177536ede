use std::collections::HashSet;

use shared::{ObjectId, SceneObject};

use crate::history::Command;
use crate::state::EditorState;

/// Where a requested object sat before deletion
#[derive(Debug, Clone)]
struct Slot {
    id: ObjectId,
    index: Option<usize>,
}

/// Delete objects together with their subtrees.
///
/// Undo puts every captured object back (requested objects at their old
/// sibling positions) and selects exactly the requested ids.
#[derive(Debug, Clone)]
pub struct DeleteObjects {
    ids: Vec<ObjectId>,
    /// Structural clones in discovery order, filled on execute
    captured: Vec<SceneObject>,
    slots: Vec<Slot>,
}

impl DeleteObjects {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ObjectId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            captured: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Ids the caller asked to delete
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    /// Number of objects captured by the last execute
    pub fn captured_count(&self) -> usize {
        self.captured.len()
    }
}

impl Command for DeleteObjects {
    type Target = EditorState;

    fn name(&self) -> &str {
        "Delete Objects"
    }

    fn execute(&mut self, state: &mut EditorState) {
        let scene = &mut state.scene;
        let root = scene.root().clone();

        self.captured.clear();
        self.slots.clear();
        let mut seen = HashSet::new();
        for id in &self.ids {
            if *id == root || !scene.contains(id) {
                continue;
            }
            for sub_id in scene.subtree(id) {
                if !seen.insert(sub_id.clone()) {
                    continue;
                }
                if let Some(object) = scene.get(&sub_id) {
                    self.captured.push(object.clone());
                }
            }
        }

        for id in &self.ids {
            if *id == root || !scene.contains(id) {
                continue;
            }
            self.slots.push(Slot {
                id: id.clone(),
                index: scene.index_in_parent(id),
            });
        }

        for slot in &self.slots {
            scene.remove_object(&slot.id);
        }

        state.selection.clear();
        tracing::debug!(
            "Deleted {} objects ({} requested)",
            self.captured.len(),
            self.ids.len()
        );
    }

    fn undo(&mut self, state: &mut EditorState) {
        let scene = &mut state.scene;

        // Lowest index first so every recorded position is exact on insert.
        let mut slots: Vec<&Slot> = self.slots.iter().collect();
        slots.sort_by_key(|s| s.index);
        for slot in &slots {
            if let Some(object) = self.captured.iter().find(|o| o.id == slot.id) {
                scene.restore_object_at(object.clone(), slot.index);
            }
        }
        for object in &self.captured {
            if !scene.contains(&object.id) {
                scene.restore_object(object.clone());
            }
        }

        state.selection.select(&self.ids, false);
    }
}
