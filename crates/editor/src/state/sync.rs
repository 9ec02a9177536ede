//! Keeps the selection consistent with the scene document

use shared::ObjectId;

use super::{SceneState, SelectionState};

/// Deselect every id that no longer exists in the scene.
///
/// Run after any mutation that bypasses the command layer. Returns the ids
/// that were pruned.
pub fn sync_selection(scene: &SceneState, selection: &mut SelectionState) -> Vec<ObjectId> {
    let stale: Vec<ObjectId> = selection
        .all()
        .iter()
        .filter(|id| !scene.contains(id))
        .cloned()
        .collect();
    if !stale.is_empty() {
        tracing::debug!("Pruning {} stale selection entries", stale.len());
        selection.deselect(&stale);
    }
    stale
}
