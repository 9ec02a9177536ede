//! Scene document store
//!
//! Owns the canonical scene tree. Every write goes through the primitives in
//! the submodules so that the hierarchy invariants hold after each call.

mod display;
mod factory;
mod hierarchy;
mod object_ops;
mod persistence;
mod transform_ops;

pub use display::{object_display_name, outline, short_id, type_icon};
pub use factory::{new_default_scene, new_empty_scene};
pub use hierarchy::{check_invariants, has_circular_dependency};

use shared::{ObjectId, Scene, SceneObject};

/// Scene document plus change tracking
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    /// Current document; read-only outside this module
    scene: Scene,
    /// Monotonically increasing version counter for cache invalidation
    version: u64,
    /// Unsaved changes since the last load/save
    dirty: bool,
}

impl SceneState {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            version: 0,
            dirty: false,
        }
    }

    /// Read access to the whole document
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Id of the root group
    pub fn root(&self) -> &ObjectId {
        &self.scene.root
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get an object by ID
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.scene.objects.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scene.objects.contains_key(id)
    }

    pub fn object_count(&self) -> usize {
        self.scene.objects.len()
    }

    /// Ordered children of an object (empty if unknown)
    pub fn children_of(&self, id: &str) -> &[ObjectId] {
        self.scene
            .objects
            .get(id)
            .map(|o| o.children.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.scene.objects.get_mut(id)
    }

    /// Record a mutation: bump version, stamp `updated_at`, mark dirty
    pub(crate) fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
        self.scene.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
