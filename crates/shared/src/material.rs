//! Inline material description stored on mesh components.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form material properties keyed by renderer property name
pub type MaterialProps = Map<String, Value>;

/// Renderer material model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialType {
    #[default]
    MeshStandardMaterial,
    MeshBasicMaterial,
    MeshLambertMaterial,
    MeshPhongMaterial,
    MeshPhysicalMaterial,
}

/// Properties every material type understands
const COMMON_KEYS: &[&str] = &[
    "color",
    "wireframe",
    "transparent",
    "opacity",
    "alphaTest",
    "depthTest",
    "depthWrite",
    "visible",
    "side",
];

fn props(entries: &[(&str, Value)]) -> MaterialProps {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

impl MaterialType {
    pub fn all() -> &'static [MaterialType] {
        &[
            MaterialType::MeshStandardMaterial,
            MaterialType::MeshBasicMaterial,
            MaterialType::MeshLambertMaterial,
            MaterialType::MeshPhongMaterial,
            MaterialType::MeshPhysicalMaterial,
        ]
    }

    fn extra_keys(self) -> &'static [&'static str] {
        match self {
            MaterialType::MeshStandardMaterial => &["roughness", "metalness"],
            MaterialType::MeshPhysicalMaterial => &[
                "roughness",
                "metalness",
                "clearcoat",
                "clearcoatRoughness",
                "ior",
                "transmission",
                "thickness",
            ],
            MaterialType::MeshPhongMaterial => &["shininess", "specular"],
            MaterialType::MeshLambertMaterial | MaterialType::MeshBasicMaterial => &[],
        }
    }

    /// Whether `key` is a property of this material type
    pub fn allows(self, key: &str) -> bool {
        COMMON_KEYS.contains(&key) || self.extra_keys().contains(&key)
    }

    /// Values filled in when switching to this type
    pub fn defaults(self) -> MaterialProps {
        match self {
            MaterialType::MeshStandardMaterial => props(&[
                ("roughness", Value::from(0.5)),
                ("metalness", Value::from(0.0)),
            ]),
            MaterialType::MeshPhysicalMaterial => props(&[
                ("roughness", Value::from(0.5)),
                ("metalness", Value::from(0.0)),
                ("clearcoat", Value::from(0.0)),
                ("clearcoatRoughness", Value::from(0.0)),
                ("ior", Value::from(1.5)),
                ("transmission", Value::from(0.0)),
                ("thickness", Value::from(0.0)),
            ]),
            MaterialType::MeshPhongMaterial => props(&[
                ("shininess", Value::from(30.0)),
                ("specular", Value::from("#111111")),
            ]),
            MaterialType::MeshLambertMaterial | MaterialType::MeshBasicMaterial => MaterialProps::new(),
        }
    }
}

/// Material type plus its properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialSpec {
    #[serde(rename = "type")]
    pub kind: MaterialType,
    #[serde(default)]
    pub props: MaterialProps,
}

impl MaterialSpec {
    pub fn new(kind: MaterialType, props: MaterialProps) -> Self {
        Self { kind, props }
    }

    /// Same type with `changes` written over the current props
    pub fn with_props(&self, changes: &MaterialProps) -> Self {
        let mut props = self.props.clone();
        for (key, value) in changes {
            props.insert(key.clone(), value.clone());
        }
        Self::new(self.kind, props)
    }

    /// Switch to `kind`, keeping only the props it understands and filling
    /// its defaults for the ones that are missing.
    pub fn converted_to(&self, kind: MaterialType) -> Self {
        let mut props: MaterialProps = self
            .props
            .iter()
            .filter(|(key, _)| kind.allows(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (key, value) in kind.defaults() {
            props.entry(key).or_insert(value);
        }
        Self::new(kind, props)
    }
}
