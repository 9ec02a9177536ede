use std::collections::HashMap;

use serde::{Deserialize, Serialize};

mod components;
mod material;

pub use components::{
    CameraComponent, CameraPatch, ComponentKind, ComponentPatch, ComponentValue, Components,
    LightComponent, LightKind, LightPatch, MeshComponent, MeshPatch, TwinComponent, TwinPatch,
    TwinStatus,
};
pub use material::{MaterialProps, MaterialSpec, MaterialType};

/// Unique identifier of a scene object
pub type ObjectId = String;

/// Identifier of the root node in freshly created scenes
pub const DEFAULT_ROOT_ID: &str = "root";

/// Current document format version
pub const SCENE_FORMAT_VERSION: &str = "1.0.0";

/// Three-component vector (position, Euler angles, scale)
pub type Vec3 = [f64; 3];

fn default_true() -> bool {
    true
}

/// Kind of node in the scene tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Group,
    Mesh,
    Light,
    Camera,
    Twin,
}

impl ObjectType {
    pub fn all() -> &'static [ObjectType] {
        &[
            ObjectType::Group,
            ObjectType::Mesh,
            ObjectType::Light,
            ObjectType::Camera,
            ObjectType::Twin,
        ]
    }
}

/// Object transform. Rotation is Euler angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial transform update; `None` fields are left untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
}

impl TransformPatch {
    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn rotation(rotation: Vec3) -> Self {
        Self {
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    pub fn scale(scale: Vec3) -> Self {
        Self {
            scale: Some(scale),
            ..Default::default()
        }
    }

    /// Patch that sets every field of `transform`
    pub fn full(transform: &Transform) -> Self {
        Self {
            position: Some(transform.position),
            rotation: Some(transform.rotation),
            scale: Some(transform.scale),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Shallow-merge into an existing transform
    pub fn apply_to(&self, transform: &mut Transform) {
        if let Some(position) = self.position {
            transform.position = position;
        }
        if let Some(rotation) = self.rotation {
            transform.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            transform.scale = scale;
        }
    }

    /// Fold a later patch into this one (fields of `later` win)
    pub fn absorb(&mut self, later: &TransformPatch) {
        if later.position.is_some() {
            self.position = later.position;
        }
        if later.rotation.is_some() {
            self.rotation = later.rotation;
        }
        if later.scale.is_some() {
            self.scale = later.scale;
        }
    }
}

/// A node in the scene tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    /// `None` only for the scene root
    pub parent_id: Option<ObjectId>,
    /// Ordered child ids; order is display order
    #[serde(default)]
    pub children: Vec<ObjectId>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,
}

impl SceneObject {
    /// Root group node (locked, no parent)
    pub fn root(id: impl Into<ObjectId>) -> Self {
        Self {
            id: id.into(),
            name: "Root".to_string(),
            object_type: ObjectType::Group,
            parent_id: None,
            children: Vec::new(),
            visible: true,
            locked: true,
            transform: Transform::new(),
            components: Components::default(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Partial object description accepted by `add_object`.
///
/// Every field is optional; missing ones get the store's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,
}

impl NewObject {
    fn typed(name: &str, object_type: ObjectType) -> Self {
        Self {
            name: Some(name.to_string()),
            object_type: Some(object_type),
            ..Default::default()
        }
    }

    pub fn group(name: &str) -> Self {
        Self::typed(name, ObjectType::Group)
    }

    pub fn mesh(name: &str) -> Self {
        let mut obj = Self::typed(name, ObjectType::Mesh);
        obj.components.mesh = Some(MeshComponent::default());
        obj
    }

    pub fn light(name: &str) -> Self {
        let mut obj = Self::typed(name, ObjectType::Light);
        obj.components.light = Some(LightComponent::default());
        obj
    }

    pub fn camera(name: &str) -> Self {
        let mut obj = Self::typed(name, ObjectType::Camera);
        obj.components.camera = Some(CameraComponent::default());
        obj
    }

    pub fn twin(name: &str, external_id: &str, data_source: &str) -> Self {
        let mut obj = Self::typed(name, ObjectType::Twin);
        obj.components.twin = Some(TwinComponent {
            external_id: external_id.to_string(),
            data_source: data_source.to_string(),
            ..Default::default()
        });
        obj
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<ObjectId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn at(self, position: Vec3) -> Self {
        self.with_transform(Transform::at(position))
    }
}

/// Kind of external asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Model,
    Material,
    Texture,
}

/// Asset referenced by id from mesh components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReference {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Material descriptor referenced by id from mesh components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub id: String,
    pub name: String,
    /// Hex color, e.g. `#ffffff`
    pub color: String,
    #[serde(default = "default_roughness")]
    pub roughness: f64,
    #[serde(default)]
    pub metalness: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_roughness() -> f64 {
    0.5
}

fn default_opacity() -> f64 {
    1.0
}

/// Scene-scoped environment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSettings {
    pub environment: String,
    pub grid_visible: bool,
    pub background_color: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            environment: "default".to_string(),
            grid_visible: true,
            background_color: "#1a1a1a".to_string(),
        }
    }
}

fn default_format_version() -> String {
    SCENE_FORMAT_VERSION.to_string()
}

/// The whole scene document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub name: String,
    #[serde(default = "default_format_version")]
    pub version: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    /// Id of the root group; never deletable
    pub root: ObjectId,
    /// Single source of truth for the hierarchy
    pub objects: HashMap<ObjectId, SceneObject>,
    #[serde(default)]
    pub assets: HashMap<String, AssetReference>,
    #[serde(default)]
    pub materials: HashMap<String, MaterialDescriptor>,
    #[serde(default)]
    pub settings: SceneSettings,
}

impl Scene {
    /// Scene containing only a root group
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let root = SceneObject::root(DEFAULT_ROOT_ID);
        let mut objects = HashMap::new();
        objects.insert(root.id.clone(), root);
        Self {
            id: id.into(),
            name: name.into(),
            version: default_format_version(),
            created_at: String::new(),
            updated_at: String::new(),
            root: DEFAULT_ROOT_ID.to_string(),
            objects,
            assets: HashMap::new(),
            materials: HashMap::new(),
            settings: SceneSettings::default(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn root_object(&self) -> Option<&SceneObject> {
        self.objects.get(&self.root)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("default-scene", "New Scene")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, [0.0; 3]);
        assert_eq!(t.rotation, [0.0; 3]);
        assert_eq!(t.scale, [1.0; 3]);
        assert!(t.is_identity());
    }

    #[test]
    fn test_transform_patch_apply_is_shallow() {
        let mut t = Transform::at([1.0, 2.0, 3.0]);
        TransformPatch::scale([2.0, 2.0, 2.0]).apply_to(&mut t);
        assert_eq!(t.position, [1.0, 2.0, 3.0]);
        assert_eq!(t.scale, [2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_transform_patch_absorb_later_wins() {
        let mut p = TransformPatch::position([1.0, 0.0, 0.0]);
        p.absorb(&TransformPatch::rotation([0.0, 1.0, 0.0]));
        p.absorb(&TransformPatch::position([5.0, 0.0, 0.0]));
        assert_eq!(p.position, Some([5.0, 0.0, 0.0]));
        assert_eq!(p.rotation, Some([0.0, 1.0, 0.0]));
        assert_eq!(p.scale, None);
    }

    #[test]
    fn test_scene_new_has_root() {
        let scene = Scene::new("s1", "Test");
        assert_eq!(scene.root, DEFAULT_ROOT_ID);
        let root = scene.root_object().unwrap();
        assert!(root.is_root());
        assert!(root.locked);
        assert_eq!(root.object_type, ObjectType::Group);
        assert_eq!(scene.objects.len(), 1);
    }

    #[test]
    fn test_scene_object_json_uses_camel_case() {
        let scene = Scene::new("s1", "Test");
        let json = serde_json::to_string(&scene).unwrap();
        assert!(json.contains(r#""parentId":null"#));
        assert!(json.contains(r#""type":"Group""#));
        assert!(json.contains(r#""gridVisible":true"#));
    }

    #[test]
    fn test_scene_json_roundtrip() {
        let mut scene = Scene::new("s1", "Test");
        scene.materials.insert(
            "m1".to_string(),
            MaterialDescriptor {
                id: "m1".to_string(),
                name: "Steel".to_string(),
                color: "#888888".to_string(),
                roughness: 0.3,
                metalness: 1.0,
                opacity: 1.0,
            },
        );
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(scene, back);
    }

    #[test]
    fn test_scene_object_missing_optional_fields() {
        let json = r#"{"id":"a","name":"A","type":"Mesh","parentId":"root"}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        assert!(obj.visible);
        assert!(!obj.locked);
        assert!(obj.children.is_empty());
        assert!(obj.transform.is_identity());
        assert!(obj.components.is_empty());
    }

    #[test]
    fn test_new_object_builders() {
        let light = NewObject::light("Sun").with_parent("g1").at([0.0, 5.0, 0.0]);
        assert_eq!(light.object_type, Some(ObjectType::Light));
        assert_eq!(light.parent_id.as_deref(), Some("g1"));
        assert!(light.components.light.is_some());
        assert_eq!(light.transform.unwrap().position, [0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_new_object_deserializes_partial() {
        let json = r#"{"name": "Box", "type": "Mesh", "parentId": "A"}"#;
        let obj: NewObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.name.as_deref(), Some("Box"));
        assert_eq!(obj.parent_id.as_deref(), Some("A"));
        assert!(obj.id.is_none());
    }
}
