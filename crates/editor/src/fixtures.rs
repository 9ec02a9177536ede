//! Factory functions for creating test data.
//!
//! Provides helpers to construct `SceneObject`s and whole `Scene`s for tests
//! and for scripted sessions.

use shared::*;

// ── Object factories ────────────────────────────────────────────

/// Bare object of the given type under `parent`
pub fn object(id: &str, name: &str, object_type: ObjectType, parent: &str) -> SceneObject {
    SceneObject {
        id: id.to_string(),
        name: name.to_string(),
        object_type,
        parent_id: Some(parent.to_string()),
        children: Vec::new(),
        visible: true,
        locked: false,
        transform: Transform::new(),
        components: Components::default(),
    }
}

/// Empty group
pub fn group(id: &str, parent: &str) -> SceneObject {
    object(id, id, ObjectType::Group, parent)
}

/// Mesh with default mesh component at `position`
pub fn mesh_at(id: &str, parent: &str, position: Vec3) -> SceneObject {
    let mut obj = object(id, id, ObjectType::Mesh, parent);
    obj.transform = Transform::at(position);
    obj.components.mesh = Some(MeshComponent::default());
    obj
}

/// Mesh at the origin
pub fn mesh(id: &str, parent: &str) -> SceneObject {
    mesh_at(id, parent, [0.0; 3])
}

/// Point light
pub fn point_light(id: &str, parent: &str, intensity: f64) -> SceneObject {
    let mut obj = object(id, id, ObjectType::Light, parent);
    obj.components.light = Some(LightComponent {
        kind: LightKind::Point,
        intensity,
        range: Some(10.0),
        ..Default::default()
    });
    obj
}

/// Perspective camera
pub fn camera(id: &str, parent: &str) -> SceneObject {
    let mut obj = object(id, id, ObjectType::Camera, parent);
    obj.components.camera = Some(CameraComponent::default());
    obj
}

/// Digital-twin node bound to `external_id`
pub fn twin(id: &str, parent: &str, external_id: &str) -> SceneObject {
    let mut obj = object(id, id, ObjectType::Twin, parent);
    obj.components.twin = Some(TwinComponent {
        external_id: external_id.to_string(),
        data_source: "test".to_string(),
        ..Default::default()
    });
    obj
}

// ── Scene factories ─────────────────────────────────────────────

/// Scene with the given objects linked under their parents, in order.
///
/// Parents must precede their children in `objects`.
pub fn scene_with(objects: Vec<SceneObject>) -> Scene {
    let mut scene = Scene::new("test-scene", "Test Scene");
    for obj in objects {
        if let Some(parent) = obj
            .parent_id
            .as_deref()
            .and_then(|pid| scene.objects.get_mut(pid))
        {
            parent.children.push(obj.id.clone());
        }
        scene.objects.insert(obj.id.clone(), obj);
    }
    scene
}

/// Root-only scene
pub fn empty_scene() -> Scene {
    scene_with(Vec::new())
}

/// `root -> A (mesh at origin)`
pub fn single_mesh_scene() -> Scene {
    scene_with(vec![mesh("A", DEFAULT_ROOT_ID)])
}

/// Two-level tree:
///
/// ```text
/// root
/// ├── props
/// │   ├── chair
/// │   └── table
/// │       └── lamp
/// ├── cam
/// └── sensor (twin "sensor-1")
/// ```
pub fn nested_scene() -> Scene {
    scene_with(vec![
        group("props", DEFAULT_ROOT_ID),
        mesh_at("chair", "props", [1.0, 0.0, 0.0]),
        mesh_at("table", "props", [0.0, 0.0, 2.0]),
        point_light("lamp", "table", 2.0),
        camera("cam", DEFAULT_ROOT_ID),
        twin("sensor", DEFAULT_ROOT_ID, "sensor-1"),
    ])
}

/// Linear chain `root -> n0 -> n1 -> ... -> n{depth-1}`
pub fn chain_scene(depth: usize) -> Scene {
    let mut objects = Vec::with_capacity(depth);
    let mut parent = DEFAULT_ROOT_ID.to_string();
    for i in 0..depth {
        let id = format!("n{i}");
        objects.push(group(&id, &parent));
        parent = id;
    }
    scene_with(objects)
}
