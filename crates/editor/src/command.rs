//! JSON action protocol for driving the editor from a front-end or a script.

use serde::{Deserialize, Serialize};
use shared::{
    ComponentPatch, MaterialProps, MaterialType, NewObject, ObjectId, Scene, TransformPatch, Vec3,
};

use crate::harness::EditorHarness;
use crate::state::outline;

/// An action the front-end can request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditorAction {
    /// Add one object (every field optional)
    AddObject { object: NewObject },
    /// Delete objects and their subtrees
    DeleteObjects { ids: Vec<ObjectId> },
    DeleteSelection,
    /// Change an object's transform. `dragging` marks an intermediate update
    /// of an ongoing gesture.
    SetTransform {
        id: ObjectId,
        #[serde(default)]
        position: Option<Vec3>,
        #[serde(default)]
        rotation: Option<Vec3>,
        #[serde(default)]
        scale: Option<Vec3>,
        #[serde(default)]
        dragging: bool,
    },
    Reparent {
        id: ObjectId,
        parent: ObjectId,
        #[serde(default)]
        index: Option<usize>,
    },
    /// Patch one component slot; `dragging` as for `set_transform`
    UpdateComponent {
        id: ObjectId,
        patch: ComponentPatch,
        #[serde(default)]
        dragging: bool,
    },
    /// Merge props into a mesh's inline material
    UpdateMaterialProps { id: ObjectId, props: MaterialProps },
    ChangeMaterialType {
        id: ObjectId,
        material_type: MaterialType,
    },
    Rename { id: ObjectId, name: String },
    Select {
        ids: Vec<ObjectId>,
        #[serde(default)]
        append: bool,
    },
    Deselect { ids: Vec<ObjectId> },
    ClearSelection,
    SelectAll,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Inspect the scene: list all objects.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
    /// Replace the document
    LoadScene { scene: Scene },
    /// Start a new document from the configured defaults
    NewScene {
        #[serde(default)]
        name: Option<String>,
    },
}

/// Response from executing an action.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single action on the harness.
pub fn execute_action(harness: &mut EditorHarness, action: EditorAction) -> CommandResponse {
    match action {
        EditorAction::AddObject { object } => match harness.add_object(object) {
            Some(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
            None => CommandResponse::err("Unknown parent or duplicate id"),
        },

        EditorAction::DeleteObjects { ids } => {
            harness.delete(&ids);
            CommandResponse::ok_with_data(serde_json::json!({ "deleted": ids }))
        }

        EditorAction::DeleteSelection => {
            let ids = harness.selected().to_vec();
            if harness.delete_selection() {
                CommandResponse::ok_with_data(serde_json::json!({ "deleted": ids }))
            } else {
                CommandResponse::err("Nothing selected")
            }
        }

        EditorAction::SetTransform {
            id,
            position,
            rotation,
            scale,
            dragging,
        } => {
            if !harness.scene().contains(&id) {
                return CommandResponse::err(format!("Object '{id}' not found"));
            }
            let patch = TransformPatch {
                position,
                rotation,
                scale,
            };
            if dragging {
                harness.drag(&id, patch);
            } else {
                harness.transform(&id, patch);
            }
            CommandResponse::ok()
        }

        EditorAction::Reparent { id, parent, index } => match harness.reparent(&id, &parent, index) {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorAction::UpdateComponent {
            id,
            patch,
            dragging,
        } => {
            if !harness.scene().contains(&id) {
                return CommandResponse::err(format!("Object '{id}' not found"));
            }
            if dragging {
                harness.drag_component(&id, patch);
            } else {
                harness.update_component(&id, patch);
            }
            CommandResponse::ok()
        }

        EditorAction::UpdateMaterialProps { id, props } => {
            if harness.update_material_props(&id, props) {
                CommandResponse::ok()
            } else {
                CommandResponse::err(format!("Object '{id}' has no mesh"))
            }
        }

        EditorAction::ChangeMaterialType { id, material_type } => {
            if harness.change_material_type(&id, material_type) {
                CommandResponse::ok()
            } else {
                CommandResponse::err(format!("Object '{id}' has no mesh"))
            }
        }

        EditorAction::Rename { id, name } => {
            if !harness.scene().contains(&id) {
                return CommandResponse::err(format!("Object '{id}' not found"));
            }
            harness.rename(&id, &name);
            CommandResponse::ok()
        }

        EditorAction::Select { ids, append } => {
            harness.select(&ids, append);
            CommandResponse::ok_with_data(serde_json::json!({
                "selected": harness.selected(),
                "active": harness.state.selection.active(),
            }))
        }

        EditorAction::Deselect { ids } => {
            harness.deselect(&ids);
            CommandResponse::ok_with_data(serde_json::json!({ "selected": harness.selected() }))
        }

        EditorAction::ClearSelection => {
            harness.clear_selection();
            CommandResponse::ok()
        }

        EditorAction::SelectAll => {
            harness.select_all();
            CommandResponse::ok_with_data(serde_json::json!({ "selected": harness.selected() }))
        }

        EditorAction::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorAction::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorAction::Inspect => {
            let scene = harness.scene();
            let objects: Vec<serde_json::Value> = scene
                .subtree(scene.root())
                .iter()
                .filter_map(|id| scene.get(id))
                .map(|obj| {
                    serde_json::json!({
                        "id": obj.id,
                        "name": obj.name,
                        "type": obj.object_type,
                        "parent_id": obj.parent_id,
                        "children": obj.children,
                        "visible": obj.visible,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "objects": objects,
                "outline": outline(scene),
                "can_undo": harness.history.can_undo(),
                "can_redo": harness.history.can_redo(),
            }))
        }

        EditorAction::ExportScene => match harness.export_scene_json() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorAction::LoadScene { scene } => match crate::state::check_invariants(&scene) {
            Ok(()) => {
                harness.load_scene(scene);
                CommandResponse::ok()
            }
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorAction::NewScene { name } => {
            harness.new_scene(name.as_deref());
            CommandResponse::ok_with_data(serde_json::json!({ "id": harness.scene().scene().id }))
        }
    }
}

/// Parse and execute a single JSON action string.
pub fn execute_json(harness: &mut EditorHarness, json: &str) -> Result<CommandResponse, String> {
    let action: EditorAction =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_action(harness, action))
}

/// Parse and execute multiple JSON actions (array).
pub fn execute_json_batch(
    harness: &mut EditorHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let actions: Vec<EditorAction> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(actions
        .into_iter()
        .map(|action| execute_action(harness, action))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serde_undo() {
        let json = r#"{"action": "undo"}"#;
        let action: EditorAction = serde_json::from_str(json).unwrap();
        assert!(matches!(action, EditorAction::Undo));
    }

    #[test]
    fn test_action_serde_add_object() {
        let json = r#"{"action": "add_object", "object": {"name": "Cube", "type": "Mesh", "parentId": "root"}}"#;
        let action: EditorAction = serde_json::from_str(json).unwrap();
        match action {
            EditorAction::AddObject { object } => {
                assert_eq!(object.name.as_deref(), Some("Cube"));
                assert_eq!(object.parent_id.as_deref(), Some("root"));
            }
            _ => panic!("Expected AddObject"),
        }
    }

    #[test]
    fn test_action_serde_select_defaults() {
        let json = r#"{"action": "select", "ids": ["a", "b"]}"#;
        let action: EditorAction = serde_json::from_str(json).unwrap();
        match action {
            EditorAction::Select { ids, append } => {
                assert_eq!(ids, vec!["a", "b"]);
                assert!(!append);
            }
            _ => panic!("Expected Select"),
        }
    }

    #[test]
    fn test_action_serde_update_component() {
        let json = r#"{"action": "update_component", "id": "lamp", "patch": {"kind": "light", "intensity": 2.5}}"#;
        let action: EditorAction = serde_json::from_str(json).unwrap();
        match action {
            EditorAction::UpdateComponent { id, patch, .. } => {
                assert_eq!(id, "lamp");
                assert!(matches!(patch, ComponentPatch::Light(p) if p.intensity == Some(2.5)));
            }
            _ => panic!("Expected UpdateComponent"),
        }
    }

    #[test]
    fn test_execute_add_and_inspect() {
        let mut h = EditorHarness::new();
        let resp = execute_json(
            &mut h,
            r#"{"action": "add_object", "object": {"id": "g", "name": "Group", "type": "Group"}}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["id"], "g");

        let resp = execute_json(&mut h, r#"{"action": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["object_count"], 2);
        assert_eq!(data["objects"][1]["name"], "Group");
        assert_eq!(data["can_undo"], true);
    }

    #[test]
    fn test_execute_add_with_unknown_parent_fails() {
        let mut h = EditorHarness::new();
        let resp = execute_json(
            &mut h,
            r#"{"action": "add_object", "object": {"parentId": "ghost"}}"#,
        )
        .unwrap();
        assert!(!resp.success);
        assert!(resp.error.is_some());
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut h = EditorHarness::new();
        h.add_object(NewObject::mesh("c1")).unwrap();

        let resp = execute_json(&mut h, r#"{"action": "undo"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["undone"], true);
        assert_eq!(h.object_count(), 1);

        let resp = execute_json(&mut h, r#"{"action": "redo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["redone"], true);
        assert_eq!(h.object_count(), 2);
    }

    #[test]
    fn test_execute_reparent_cycle_is_error() {
        let mut h = EditorHarness::new();
        h.add_object(NewObject::group("a").with_id("a")).unwrap();
        h.add_object(NewObject::group("b").with_id("b").with_parent("a")).unwrap();

        let resp = execute_json(&mut h, r#"{"action": "reparent", "id": "a", "parent": "b"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("circular"));
    }

    #[test]
    fn test_execute_export_scene() {
        let mut h = EditorHarness::new();
        h.add_object(NewObject::mesh("c1")).unwrap();

        let resp = execute_json(&mut h, r#"{"action": "export_scene"}"#).unwrap();
        let data = resp.data.unwrap();
        let scene_json = data["scene_json"].as_str().unwrap();
        assert!(scene_json.contains("objects"));
    }

    #[test]
    fn test_execute_load_scene_rejects_invalid() {
        let mut h = EditorHarness::new();
        let mut scene = Scene::default();
        scene.objects.clear();
        let json = serde_json::json!({ "action": "load_scene", "scene": scene }).to_string();
        let resp = execute_json(&mut h, &json).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_batch() {
        let mut h = EditorHarness::new();
        let batch = r#"[
            {"action": "add_object", "object": {"id": "a"}},
            {"action": "set_transform", "id": "a", "position": [1, 2, 3]},
            {"action": "select", "ids": ["a"]},
            {"action": "delete_selection"}
        ]"#;
        let responses = execute_json_batch(&mut h, batch).unwrap();
        assert!(responses.iter().all(|r| r.success));
        assert!(!h.scene().contains("a"));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = EditorHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}
