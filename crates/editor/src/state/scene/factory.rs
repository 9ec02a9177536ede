//! New-document factories

use shared::{
    CameraComponent, Components, LightComponent, ObjectType, Scene, SceneObject, SceneSettings,
    Transform,
};

/// Root-only document with a fresh id and creation timestamps
pub fn new_empty_scene(name: &str) -> Scene {
    let mut scene = Scene::new(uuid::Uuid::new_v4().to_string(), name);
    let now = chrono::Utc::now().to_rfc3339();
    scene.created_at = now.clone();
    scene.updated_at = now;
    scene
}

/// Document with a default camera and directional light under the root
pub fn new_default_scene(name: &str, settings: &SceneSettings) -> Scene {
    let mut scene = new_empty_scene(name);
    scene.settings = settings.clone();

    let camera = SceneObject {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Main Camera".to_string(),
        object_type: ObjectType::Camera,
        parent_id: Some(scene.root.clone()),
        children: Vec::new(),
        visible: true,
        locked: false,
        transform: Transform::at([0.0, 1.0, -10.0]),
        components: Components {
            camera: Some(CameraComponent::default()),
            ..Default::default()
        },
    };

    let light = SceneObject {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Directional Light".to_string(),
        object_type: ObjectType::Light,
        parent_id: Some(scene.root.clone()),
        children: Vec::new(),
        visible: true,
        locked: false,
        transform: Transform {
            position: [0.0, 3.0, 0.0],
            rotation: [50f64.to_radians(), (-30f64).to_radians(), 0.0],
            scale: [1.0, 1.0, 1.0],
        },
        components: Components {
            light: Some(LightComponent::default()),
            ..Default::default()
        },
    };

    for object in [camera, light] {
        if let Some(root) = scene.objects.get_mut(&scene.root) {
            root.children.push(object.id.clone());
        }
        scene.objects.insert(object.id.clone(), object);
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scene::check_invariants;
    use shared::LightKind;

    #[test]
    fn test_empty_scene_is_root_only() {
        let scene = new_empty_scene("Empty");
        assert_eq!(scene.name, "Empty");
        assert_eq!(scene.objects.len(), 1);
        assert!(!scene.created_at.is_empty());
        check_invariants(&scene).unwrap();
    }

    #[test]
    fn test_empty_scenes_get_distinct_ids() {
        assert_ne!(new_empty_scene("a").id, new_empty_scene("a").id);
    }

    #[test]
    fn test_default_scene_has_camera_and_light() {
        let scene = new_default_scene("Demo", &SceneSettings::default());
        check_invariants(&scene).unwrap();

        let root = scene.root_object().unwrap();
        assert_eq!(root.children.len(), 2);

        let camera = scene.get(&root.children[0]).unwrap();
        assert_eq!(camera.name, "Main Camera");
        let cam = camera.components.camera.as_ref().unwrap();
        assert_eq!((cam.fov, cam.near, cam.far), (60.0, 0.1, 1000.0));

        let light = scene.get(&root.children[1]).unwrap();
        assert_eq!(light.object_type, ObjectType::Light);
        let l = light.components.light.as_ref().unwrap();
        assert_eq!(l.kind, LightKind::Directional);
        assert_eq!(l.cast_shadow, Some(true));
    }
}
