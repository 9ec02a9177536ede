//! Integration tests for the EditorAction JSON protocol.
//!
//! Tests the full pipeline: JSON string -> parse -> execute -> response.

use scene_editor_lib::command::{execute_json, execute_json_batch};
use scene_editor_lib::harness::EditorHarness;

#[test]
fn test_command_add_object() {
    let mut h = EditorHarness::new();

    let json = r#"{"action": "add_object", "object": {"name": "Box1", "type": "Mesh"}}"#;

    let resp = execute_json(&mut h, json).unwrap();
    assert!(resp.success);
    assert!(resp.data.as_ref().unwrap()["id"].as_str().is_some());
    assert_eq!(h.object_count(), 2);
}

#[test]
fn test_command_add_object_with_transform() {
    let mut h = EditorHarness::new();

    let json = r#"{"action": "add_object", "object": {"id": "box", "transform": {"position": [1.0, 2.0, 3.0], "rotation": [0, 0, 0], "scale": [1, 1, 1]}}}"#;

    let resp = execute_json(&mut h, json).unwrap();
    assert!(resp.success);
    assert_eq!(h.scene().get("box").unwrap().transform.position, [1.0, 2.0, 3.0]);
}

#[test]
fn test_command_add_duplicate_id_fails() {
    let mut h = EditorHarness::new();
    let json = r#"{"action": "add_object", "object": {"id": "box"}}"#;
    assert!(execute_json(&mut h, json).unwrap().success);
    let resp = execute_json(&mut h, json).unwrap();
    assert!(!resp.success);
    assert_eq!(h.object_count(), 2);
}

#[test]
fn test_command_drag_then_release() {
    let mut h = EditorHarness::new();
    let batch = r#"[
        {"action": "add_object", "object": {"id": "a"}},
        {"action": "set_transform", "id": "a", "position": [1, 0, 0], "dragging": true},
        {"action": "set_transform", "id": "a", "position": [2, 0, 0], "dragging": true},
        {"action": "set_transform", "id": "a", "position": [3, 0, 0]},
        {"action": "undo"}
    ]"#;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(h.scene().get("a").unwrap().transform.position, [0.0, 0.0, 0.0]);
    assert_eq!(h.undo_count(), 1); // the add
}

#[test]
fn test_command_set_transform_unknown_id() {
    let mut h = EditorHarness::new();
    let resp = execute_json(&mut h, r#"{"action": "set_transform", "id": "ghost", "scale": [2, 2, 2]}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(h.undo_count(), 0);
}

#[test]
fn test_command_select_reports_active() {
    let mut h = EditorHarness::new();
    execute_json_batch(
        &mut h,
        r#"[
            {"action": "add_object", "object": {"id": "a"}},
            {"action": "add_object", "object": {"id": "b"}}
        ]"#,
    )
    .unwrap();

    let resp = execute_json(&mut h, r#"{"action": "select", "ids": ["b", "a"]}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["selected"], serde_json::json!(["b", "a"]));
    assert_eq!(data["active"], "a");

    let resp = execute_json(&mut h, r#"{"action": "deselect", "ids": ["a"]}"#).unwrap();
    assert_eq!(resp.data.unwrap()["selected"], serde_json::json!(["b"]));
    assert_eq!(h.state.selection.active().map(String::as_str), Some("b"));
}

#[test]
fn test_command_delete_selection_and_undo() {
    let mut h = EditorHarness::new();
    let batch = r#"[
        {"action": "add_object", "object": {"id": "g", "type": "Group"}},
        {"action": "add_object", "object": {"id": "m", "parentId": "g"}},
        {"action": "select", "ids": ["g"]},
        {"action": "delete_selection"}
    ]"#;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(h.object_count(), 1);

    let resp = execute_json(&mut h, r#"{"action": "undo"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["undone"], true);
    assert_eq!(h.object_count(), 3);
    assert_eq!(h.selected(), &["g".to_string()]);
}

#[test]
fn test_command_delete_selection_empty() {
    let mut h = EditorHarness::new();
    let resp = execute_json(&mut h, r#"{"action": "delete_selection"}"#).unwrap();
    assert!(!resp.success);
}

#[test]
fn test_command_update_component() {
    let mut h = EditorHarness::new();
    let batch = r#"[
        {"action": "add_object", "object": {"id": "cam", "type": "Camera", "components": {"camera": {"fov": 60, "near": 0.1, "far": 1000, "orthographic": false}}}},
        {"action": "update_component", "id": "cam", "patch": {"kind": "camera", "fov": 35}}
    ]"#;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert!(responses.iter().all(|r| r.success), "{responses:?}");
    let cam = h.scene().get("cam").unwrap().components.camera.clone().unwrap();
    assert_eq!(cam.fov, 35.0);

    execute_json(&mut h, r#"{"action": "undo"}"#).unwrap();
    let cam = h.scene().get("cam").unwrap().components.camera.clone().unwrap();
    assert_eq!(cam.fov, 60.0);
}

#[test]
fn test_command_component_slider_drag() {
    let mut h = EditorHarness::new();
    let batch = r##"[
        {"action": "add_object", "object": {"id": "sun", "type": "Light", "components": {"light": {"color": "#ffffff", "intensity": 1, "type": "point"}}}},
        {"action": "update_component", "id": "sun", "patch": {"kind": "light", "intensity": 2}, "dragging": true},
        {"action": "update_component", "id": "sun", "patch": {"kind": "light", "intensity": 3}, "dragging": true},
        {"action": "update_component", "id": "sun", "patch": {"kind": "light", "intensity": 4}}
    ]"##;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert!(responses.iter().all(|r| r.success), "{responses:?}");
    assert_eq!(h.undo_count(), 2);

    execute_json(&mut h, r#"{"action": "undo"}"#).unwrap();
    let light = h.scene().get("sun").unwrap().components.light.clone().unwrap();
    assert_eq!(light.intensity, 1.0);
}

#[test]
fn test_command_material_edits() {
    let mut h = EditorHarness::new();
    let batch = r##"[
        {"action": "add_object", "object": {"id": "box", "components": {"mesh": {"assetId": "a", "materialId": "m", "castShadow": true, "receiveShadow": true}}}},
        {"action": "change_material_type", "id": "box", "material_type": "MeshPhongMaterial"},
        {"action": "update_material_props", "id": "box", "props": {"shininess": 80}},
        {"action": "update_material_props", "id": "box", "props": {"color": "#336699"}}
    ]"##;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert!(responses.iter().all(|r| r.success), "{responses:?}");
    // add + type change + one coalesced props edit
    assert_eq!(h.undo_count(), 3);

    let exported = h.export_scene_json().unwrap();
    assert!(exported.contains(r#""type": "MeshPhongMaterial""#));

    execute_json(&mut h, r#"{"action": "undo"}"#).unwrap();
    let spec = h.scene().get("box").unwrap().components.mesh.clone().unwrap().material.unwrap();
    assert_eq!(spec.props["shininess"], 30.0);
    assert!(!spec.props.contains_key("color"));

    execute_json(&mut h, r#"{"action": "undo"}"#).unwrap();
    assert!(h.scene().get("box").unwrap().components.mesh.clone().unwrap().material.is_none());
}

#[test]
fn test_command_material_edit_without_mesh_fails() {
    let mut h = EditorHarness::new();
    execute_json(&mut h, r#"{"action": "add_object", "object": {"id": "g", "type": "Group"}}"#).unwrap();
    let resp = execute_json(
        &mut h,
        r#"{"action": "change_material_type", "id": "g", "material_type": "MeshBasicMaterial"}"#,
    )
    .unwrap();
    assert!(!resp.success);
    assert_eq!(h.undo_count(), 1);
}

#[test]
fn test_command_reparent_with_index() {
    let mut h = EditorHarness::new();
    let batch = r#"[
        {"action": "add_object", "object": {"id": "g", "type": "Group"}},
        {"action": "add_object", "object": {"id": "x", "parentId": "g"}},
        {"action": "add_object", "object": {"id": "y"}},
        {"action": "reparent", "id": "y", "parent": "g", "index": 0}
    ]"#;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(h.scene().children_of("g"), &["y", "x"].map(String::from));
}

#[test]
fn test_command_reparent_root_or_unknown_succeeds_without_change() {
    let mut h = EditorHarness::new();
    execute_json(&mut h, r#"{"action": "add_object", "object": {"id": "a"}}"#).unwrap();
    let undo_before = h.undo_count();

    for json in [
        r#"{"action": "reparent", "id": "root", "parent": "a"}"#,
        r#"{"action": "reparent", "id": "ghost", "parent": "a"}"#,
        r#"{"action": "reparent", "id": "a", "parent": "ghost"}"#,
    ] {
        let resp = execute_json(&mut h, json).unwrap();
        assert!(resp.success, "{json}: {:?}", resp.error);
    }
    assert_eq!(h.scene().get("a").unwrap().parent_id.as_deref(), Some("root"));
    assert_eq!(h.undo_count(), undo_before);
}

#[test]
fn test_command_reparent_cycle_fails() {
    let mut h = EditorHarness::new();
    let batch = r#"[
        {"action": "add_object", "object": {"id": "g", "type": "Group"}},
        {"action": "add_object", "object": {"id": "x", "parentId": "g"}},
        {"action": "reparent", "id": "g", "parent": "x"}
    ]"#;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert!(!responses[2].success);
    assert!(responses[2].error.as_deref().unwrap().contains("circular dependency"));
}

#[test]
fn test_command_new_scene_and_load() {
    let mut h = EditorHarness::new();
    let resp = execute_json(&mut h, r#"{"action": "new_scene", "name": "Warehouse"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.scene().scene().name, "Warehouse");
    assert_eq!(h.object_count(), 3);

    let exported = execute_json(&mut h, r#"{"action": "export_scene"}"#).unwrap();
    let scene_json = exported.data.unwrap()["scene_json"].as_str().unwrap().to_string();

    let mut h2 = EditorHarness::new();
    let load = format!(r#"{{"action": "load_scene", "scene": {scene_json}}}"#);
    let resp = execute_json(&mut h2, &load).unwrap();
    assert!(resp.success);
    assert_eq!(h2.scene().scene().name, "Warehouse");
    assert_eq!(h2.object_count(), 3);
}

#[test]
fn test_command_inspect_lists_tree_order() {
    let mut h = EditorHarness::new();
    execute_json_batch(
        &mut h,
        r#"[
            {"action": "add_object", "object": {"id": "g", "name": "G", "type": "Group"}},
            {"action": "add_object", "object": {"id": "m", "name": "M", "parentId": "g"}},
            {"action": "add_object", "object": {"id": "n", "name": "N"}}
        ]"#,
    )
    .unwrap();
    let data = execute_json(&mut h, r#"{"action": "inspect"}"#).unwrap().data.unwrap();
    let ids: Vec<&str> = data["objects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["root", "g", "m", "n"]);
    assert!(data["outline"].as_str().unwrap().contains("    [M] M"));
}

#[test]
fn test_command_unknown_action() {
    let mut h = EditorHarness::new();
    let err = execute_json(&mut h, r#"{"action": "fly_to_moon"}"#).unwrap_err();
    assert!(err.starts_with("Invalid command JSON"));
}

#[test]
fn test_command_batch_invalid() {
    let mut h = EditorHarness::new();
    assert!(execute_json_batch(&mut h, r#"{"action": "undo"}"#).is_err());
}
