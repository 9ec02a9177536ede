//! Typed component slots attached to scene objects.
//!
//! A slot is `None` when the component does not apply to the node.

use serde::{Deserialize, Serialize};

use crate::material::MaterialSpec;

/// Mesh/material reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshComponent {
    pub asset_id: String,
    pub material_id: String,
    /// Inline material overriding the referenced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialSpec>,
    /// Built-in geometry name (box, sphere, ...) when no asset is loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            asset_id: "default".to_string(),
            material_id: "default".to_string(),
            material: None,
            geometry: None,
            cast_shadow: true,
            receive_shadow: true,
        }
    }
}

/// Connection state of a digital-twin data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwinStatus {
    Online,
    #[default]
    Offline,
    Error,
}

/// Digital-twin metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinComponent {
    pub external_id: String,
    pub data_source: String,
    /// Milliseconds since the Unix epoch
    pub last_update: i64,
    pub status: TwinStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraComponent {
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub orthographic: bool,
    /// Orthographic frustum size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 1000.0,
            orthographic: false,
            size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    #[default]
    Directional,
    Point,
    Spot,
    Ambient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightComponent {
    pub color: String,
    pub intensity: f64,
    #[serde(rename = "type")]
    pub kind: LightKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_shadow: Option<bool>,
    /// Point/spot range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    /// Spot cone angle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            intensity: 1.0,
            kind: LightKind::Directional,
            cast_shadow: Some(true),
            range: None,
            angle: None,
        }
    }
}

/// Names one component slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Mesh,
    Twin,
    Camera,
    Light,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Mesh => "mesh",
            ComponentKind::Twin => "twin",
            ComponentKind::Camera => "camera",
            ComponentKind::Light => "light",
        }
    }
}

/// A full component value of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentValue {
    Mesh(MeshComponent),
    Twin(TwinComponent),
    Camera(CameraComponent),
    Light(LightComponent),
}

impl ComponentValue {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentValue::Mesh(_) => ComponentKind::Mesh,
            ComponentValue::Twin(_) => ComponentKind::Twin,
            ComponentValue::Camera(_) => ComponentKind::Camera,
            ComponentValue::Light(_) => ComponentKind::Light,
        }
    }
}

/// Sparse set of components on one object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twin: Option<TwinComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<LightComponent>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.mesh.is_none() && self.twin.is_none() && self.camera.is_none() && self.light.is_none()
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Copy of the value stored in a slot
    pub fn slot(&self, kind: ComponentKind) -> Option<ComponentValue> {
        match kind {
            ComponentKind::Mesh => self.mesh.clone().map(ComponentValue::Mesh),
            ComponentKind::Twin => self.twin.clone().map(ComponentValue::Twin),
            ComponentKind::Camera => self.camera.clone().map(ComponentValue::Camera),
            ComponentKind::Light => self.light.clone().map(ComponentValue::Light),
        }
    }

    /// Put a slot back to a previously captured state (`None` clears it)
    pub fn restore_slot(&mut self, kind: ComponentKind, value: Option<ComponentValue>) {
        match value {
            Some(ComponentValue::Mesh(c)) => self.mesh = Some(c),
            Some(ComponentValue::Twin(c)) => self.twin = Some(c),
            Some(ComponentValue::Camera(c)) => self.camera = Some(c),
            Some(ComponentValue::Light(c)) => self.light = Some(c),
            None => match kind {
                ComponentKind::Mesh => self.mesh = None,
                ComponentKind::Twin => self.twin = None,
                ComponentKind::Camera => self.camera = None,
                ComponentKind::Light => self.light = None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_shadow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_shadow: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TwinStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub far: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orthographic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<LightKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_shadow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

/// Partial update of a single component slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentPatch {
    Mesh(MeshPatch),
    Twin(TwinPatch),
    Camera(CameraPatch),
    Light(LightPatch),
}

fn set<T>(target: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *target = v.clone();
    }
}

fn take<T: Clone>(target: &mut Option<T>, later: &Option<T>) {
    if later.is_some() {
        *target = later.clone();
    }
}

impl ComponentPatch {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentPatch::Mesh(_) => ComponentKind::Mesh,
            ComponentPatch::Twin(_) => ComponentKind::Twin,
            ComponentPatch::Camera(_) => ComponentKind::Camera,
            ComponentPatch::Light(_) => ComponentKind::Light,
        }
    }

    /// Fold a later patch of the same kind into this one (later fields win).
    /// Returns false when the kinds differ.
    pub fn absorb(&mut self, later: &ComponentPatch) -> bool {
        match (self, later) {
            (ComponentPatch::Mesh(a), ComponentPatch::Mesh(b)) => {
                take(&mut a.asset_id, &b.asset_id);
                take(&mut a.material_id, &b.material_id);
                take(&mut a.geometry, &b.geometry);
                take(&mut a.cast_shadow, &b.cast_shadow);
                take(&mut a.receive_shadow, &b.receive_shadow);
            }
            (ComponentPatch::Twin(a), ComponentPatch::Twin(b)) => {
                take(&mut a.external_id, &b.external_id);
                take(&mut a.data_source, &b.data_source);
                take(&mut a.last_update, &b.last_update);
                take(&mut a.status, &b.status);
            }
            (ComponentPatch::Camera(a), ComponentPatch::Camera(b)) => {
                take(&mut a.fov, &b.fov);
                take(&mut a.near, &b.near);
                take(&mut a.far, &b.far);
                take(&mut a.orthographic, &b.orthographic);
                take(&mut a.size, &b.size);
            }
            (ComponentPatch::Light(a), ComponentPatch::Light(b)) => {
                take(&mut a.color, &b.color);
                take(&mut a.intensity, &b.intensity);
                take(&mut a.kind, &b.kind);
                take(&mut a.cast_shadow, &b.cast_shadow);
                take(&mut a.range, &b.range);
                take(&mut a.angle, &b.angle);
            }
            _ => return false,
        }
        true
    }

    /// Shallow-merge into the matching slot, creating it from defaults if absent
    pub fn apply_to(&self, components: &mut Components) {
        match self {
            ComponentPatch::Mesh(p) => {
                let c = components.mesh.get_or_insert_with(MeshComponent::default);
                set(&mut c.asset_id, &p.asset_id);
                set(&mut c.material_id, &p.material_id);
                if p.geometry.is_some() {
                    c.geometry = p.geometry.clone();
                }
                set(&mut c.cast_shadow, &p.cast_shadow);
                set(&mut c.receive_shadow, &p.receive_shadow);
            }
            ComponentPatch::Twin(p) => {
                let c = components.twin.get_or_insert_with(TwinComponent::default);
                set(&mut c.external_id, &p.external_id);
                set(&mut c.data_source, &p.data_source);
                set(&mut c.last_update, &p.last_update);
                set(&mut c.status, &p.status);
            }
            ComponentPatch::Camera(p) => {
                let c = components.camera.get_or_insert_with(CameraComponent::default);
                set(&mut c.fov, &p.fov);
                set(&mut c.near, &p.near);
                set(&mut c.far, &p.far);
                set(&mut c.orthographic, &p.orthographic);
                if p.size.is_some() {
                    c.size = p.size;
                }
            }
            ComponentPatch::Light(p) => {
                let c = components.light.get_or_insert_with(LightComponent::default);
                set(&mut c.color, &p.color);
                set(&mut c.intensity, &p.intensity);
                set(&mut c.kind, &p.kind);
                if p.cast_shadow.is_some() {
                    c.cast_shadow = p.cast_shadow;
                }
                if p.range.is_some() {
                    c.range = p.range;
                }
                if p.angle.is_some() {
                    c.angle = p.angle;
                }
            }
        }
    }
}
