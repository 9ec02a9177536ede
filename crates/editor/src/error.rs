//! Error types for the editor core.

use shared::ObjectId;
use thiserror::Error;

/// Errors raised by scene store operations, persistence and settings.
///
/// Unknown ids and attempts to touch the root are not errors: those
/// operations are silent no-ops.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Moving `id` under `new_parent` would make it its own ancestor.
    #[error("cannot move '{id}' under '{new_parent}': circular dependency")]
    CircularDependency { id: ObjectId, new_parent: ObjectId },

    /// A loaded document violates the hierarchy invariants.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No platform config/data directory could be determined.
    #[error("no application data directory available")]
    NoDataDir,
}

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
