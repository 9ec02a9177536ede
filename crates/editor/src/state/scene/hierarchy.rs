//! Hierarchy operations: reparenting, tree walks and invariant checks

use std::collections::{HashMap, HashSet};

use shared::{ObjectId, Scene, SceneObject};

use super::SceneState;
use crate::error::{EditorError, Result};

/// Would making `new_parent_id` the parent of `target_id` create a cycle?
///
/// Walks the ancestors of `new_parent_id` up to the root, comparing against
/// `target_id` at each step. O(depth).
pub fn has_circular_dependency(
    objects: &HashMap<ObjectId, SceneObject>,
    target_id: &str,
    new_parent_id: &str,
) -> bool {
    let mut current = Some(new_parent_id);
    let mut steps = 0;
    while let Some(id) = current {
        if id == target_id {
            return true;
        }
        // More steps than nodes: the document already contains a cycle.
        steps += 1;
        if steps > objects.len() {
            return true;
        }
        current = objects.get(id).and_then(|o| o.parent_id.as_deref());
    }
    false
}

impl SceneState {
    /// Move `id` under `new_parent_id`.
    ///
    /// `index` is the position among the new siblings, counted after `id`
    /// has been detached from its old parent; out-of-range or `None` appends.
    /// Root and unknown ids are ignored. Fails with
    /// [`EditorError::CircularDependency`] when `new_parent_id` is `id` or one
    /// of its descendants, leaving the tree unchanged.
    pub fn reparent(&mut self, id: &str, new_parent_id: &str, index: Option<usize>) -> Result<()> {
        if id == self.scene.root {
            tracing::debug!("reparent: root cannot be moved");
            return Ok(());
        }
        let Some(old_parent_id) = self.get(id).and_then(|o| o.parent_id.clone()) else {
            return Ok(());
        };
        if !self.contains(new_parent_id) {
            tracing::debug!("reparent: new parent {new_parent_id} not found");
            return Ok(());
        }
        if has_circular_dependency(&self.scene.objects, id, new_parent_id) {
            tracing::warn!("reparent: moving {id} under {new_parent_id} would create a cycle");
            return Err(EditorError::CircularDependency {
                id: id.to_string(),
                new_parent: new_parent_id.to_string(),
            });
        }

        if let Some(old_parent) = self.scene.objects.get_mut(&old_parent_id) {
            old_parent.children.retain(|c| c != id);
        }
        if let Some(new_parent) = self.scene.objects.get_mut(new_parent_id) {
            match index {
                Some(i) if i <= new_parent.children.len() => {
                    new_parent.children.insert(i, id.to_string());
                }
                _ => new_parent.children.push(id.to_string()),
            }
        }
        if let Some(object) = self.scene.objects.get_mut(id) {
            object.parent_id = Some(new_parent_id.to_string());
        }

        self.touch();
        Ok(())
    }

    /// `id` followed by all of its descendants, pre-order
    pub fn subtree(&self, id: &str) -> Vec<ObjectId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut seen = HashSet::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(object) = self.get(&current) {
                stack.extend(object.children.iter().rev().cloned());
            }
            out.push(current);
        }
        out
    }

    /// All descendants of `id`, pre-order, excluding `id` itself
    pub fn descendants(&self, id: &str) -> Vec<ObjectId> {
        let mut ids = self.subtree(id);
        if !ids.is_empty() {
            ids.remove(0);
        }
        ids
    }

    /// Ancestors of `id`, nearest first, ending with the root
    pub fn ancestors(&self, id: &str) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut current = self.get(id).and_then(|o| o.parent_id.clone());
        while let Some(pid) = current {
            if out.contains(&pid) || out.len() > self.object_count() {
                break;
            }
            current = self.get(&pid).and_then(|o| o.parent_id.clone());
            out.push(pid);
        }
        out
    }

    /// Position of `id` among its parent's children
    pub fn index_in_parent(&self, id: &str) -> Option<usize> {
        let parent_id = self.get(id)?.parent_id.as_deref()?;
        self.children_of(parent_id).iter().position(|c| c == id)
    }
}

/// Validate the hierarchy invariants of a document.
///
/// Checks that the root exists and has no parent, that every other node has an
/// existing parent listing it exactly once, that every child entry points back
/// to its parent, and that every node reaches the root.
pub fn check_invariants(scene: &Scene) -> Result<()> {
    let invalid = |msg: String| Err(EditorError::InvalidScene(msg));

    let Some(root) = scene.objects.get(&scene.root) else {
        return invalid(format!("root '{}' missing", scene.root));
    };
    if root.parent_id.is_some() {
        return invalid(format!("root '{}' has a parent", scene.root));
    }

    for (key, object) in &scene.objects {
        if *key != object.id {
            return invalid(format!("object stored under '{key}' has id '{}'", object.id));
        }

        if *key != scene.root {
            let Some(parent_id) = &object.parent_id else {
                return invalid(format!("'{key}' has no parent"));
            };
            let Some(parent) = scene.objects.get(parent_id) else {
                return invalid(format!("'{key}' references missing parent '{parent_id}'"));
            };
            let listed = parent.children.iter().filter(|c| *c == key).count();
            if listed != 1 {
                return invalid(format!(
                    "'{parent_id}' lists child '{key}' {listed} times"
                ));
            }
        }

        for child_id in &object.children {
            let Some(child) = scene.objects.get(child_id) else {
                return invalid(format!("'{key}' lists missing child '{child_id}'"));
            };
            if child.parent_id.as_deref() != Some(key.as_str()) {
                return invalid(format!("'{child_id}' is listed under '{key}' but has another parent"));
            }
        }

        // Every walk must terminate at the root within |objects| steps.
        let mut current = object.parent_id.as_deref();
        let mut steps = 0;
        while let Some(pid) = current {
            steps += 1;
            if steps > scene.objects.len() {
                return invalid(format!("cycle through '{key}'"));
            }
            current = scene.objects.get(pid).and_then(|o| o.parent_id.as_deref());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::NewObject;

    /// root -> A -> B -> C, root -> D
    fn chain() -> SceneState {
        let mut s = SceneState::default();
        s.add_object(NewObject::group("A").with_id("A")).unwrap();
        s.add_object(NewObject::group("B").with_id("B").with_parent("A")).unwrap();
        s.add_object(NewObject::mesh("C").with_id("C").with_parent("B")).unwrap();
        s.add_object(NewObject::mesh("D").with_id("D")).unwrap();
        s
    }

    #[test]
    fn test_circular_dependency_detection() {
        let s = chain();
        let objects = &s.scene().objects;
        assert!(has_circular_dependency(objects, "A", "A"));
        assert!(has_circular_dependency(objects, "A", "C"));
        assert!(has_circular_dependency(objects, "B", "C"));
        assert!(!has_circular_dependency(objects, "C", "A"));
        assert!(!has_circular_dependency(objects, "A", "D"));
        assert!(!has_circular_dependency(objects, "A", "unknown"));
    }

    #[test]
    fn test_reparent_moves_between_parents() {
        let mut s = chain();
        s.reparent("C", "D", None).unwrap();
        assert!(s.children_of("B").is_empty());
        assert_eq!(s.children_of("D"), &["C".to_string()]);
        assert_eq!(s.get("C").unwrap().parent_id.as_deref(), Some("D"));
        check_invariants(s.scene()).unwrap();
    }

    #[test]
    fn test_reparent_to_descendant_is_rejected() {
        let mut s = chain();
        let before = s.scene().objects.clone();
        let err = s.reparent("A", "C", None).unwrap_err();
        assert!(matches!(err, EditorError::CircularDependency { .. }));
        assert_eq!(s.scene().objects, before);
    }

    #[test]
    fn test_reparent_to_self_is_rejected() {
        let mut s = chain();
        assert!(s.reparent("B", "B", None).is_err());
    }

    #[test]
    fn test_reparent_root_is_ignored() {
        let mut s = chain();
        let root_before = s.get("root").cloned();
        s.reparent("root", "A", None).unwrap();
        assert_eq!(s.get("root").cloned(), root_before);
    }

    #[test]
    fn test_reparent_unknown_ids_are_noops() {
        let mut s = chain();
        let v = s.version();
        s.reparent("ghost", "A", None).unwrap();
        s.reparent("C", "ghost", None).unwrap();
        assert_eq!(s.version(), v);
    }

    #[test]
    fn test_reparent_with_index() {
        let mut s = chain();
        // root children: [A, D]
        s.reparent("C", "root", Some(1)).unwrap();
        assert_eq!(s.children_of("root"), &["A", "C", "D"].map(String::from));
    }

    #[test]
    fn test_reorder_within_same_parent() {
        let mut s = chain();
        s.reparent("D", "root", Some(0)).unwrap();
        assert_eq!(s.children_of("root"), &["D", "A"].map(String::from));
    }

    #[test]
    fn test_subtree_and_descendants() {
        let s = chain();
        assert_eq!(s.subtree("A"), vec!["A", "B", "C"]);
        assert_eq!(s.descendants("A"), vec!["B", "C"]);
        assert!(s.descendants("D").is_empty());
        assert!(s.subtree("ghost").is_empty());
    }

    #[test]
    fn test_ancestors_end_at_root() {
        let s = chain();
        assert_eq!(s.ancestors("C"), vec!["B", "A", "root"]);
        assert!(s.ancestors("root").is_empty());
    }

    #[test]
    fn test_index_in_parent() {
        let s = chain();
        assert_eq!(s.index_in_parent("A"), Some(0));
        assert_eq!(s.index_in_parent("D"), Some(1));
        assert_eq!(s.index_in_parent("root"), None);
    }

    #[test]
    fn test_check_invariants_detects_dangling_child() {
        let mut scene = chain().scene().clone();
        scene
            .objects
            .get_mut("D")
            .unwrap()
            .children
            .push("ghost".to_string());
        assert!(matches!(
            check_invariants(&scene),
            Err(EditorError::InvalidScene(_))
        ));
    }

    #[test]
    fn test_check_invariants_detects_cycle() {
        let mut scene = chain().scene().clone();
        // A <-> B detached from root
        scene.objects.get_mut("root").unwrap().children.retain(|c| c != "A");
        scene.objects.get_mut("A").unwrap().parent_id = Some("B".to_string());
        scene.objects.get_mut("B").unwrap().children.push("A".to_string());
        assert!(check_invariants(&scene).is_err());
    }

    #[test]
    fn test_acyclicity_after_many_reparents() {
        let mut s = chain();
        let moves = [
            ("D", "C"),
            ("A", "D"),
            ("B", "root"),
            ("C", "B"),
            ("A", "C"),
            ("B", "A"),
        ];
        for (id, parent) in moves {
            let _ = s.reparent(id, parent, None);
            check_invariants(s.scene()).unwrap();
        }
        for id in s.scene().objects.keys() {
            let ancestors = s.ancestors(id);
            assert!(ancestors.len() < s.object_count());
            if id != "root" {
                assert_eq!(ancestors.last().map(String::as_str), Some("root"));
            }
        }
    }
}
