//! Display helper functions for scene objects

use shared::{ObjectType, SceneObject};

use super::SceneState;

/// Get display name for an object
pub fn object_display_name(object: &SceneObject) -> String {
    format!("{} ({})", object.name, short_id(&object.id))
}

/// Get icon for an object type
pub fn type_icon(object_type: ObjectType) -> &'static str {
    match object_type {
        ObjectType::Group => "[G]",
        ObjectType::Mesh => "[M]",
        ObjectType::Light => "[L]",
        ObjectType::Camera => "[C]",
        ObjectType::Twin => "[T]",
    }
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}

/// Indented text outline of the tree, one object per line, children in order
pub fn outline(state: &SceneState) -> String {
    let mut out = String::new();
    let mut stack = vec![(state.root().clone(), 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let Some(object) = state.get(&id) else {
            continue;
        };
        let hidden = if object.visible { "" } else { " (hidden)" };
        out.push_str(&format!(
            "{}{} {}{}\n",
            "  ".repeat(depth),
            type_icon(object.object_type),
            object.name,
            hidden
        ));
        for child in object.children.iter().rev() {
            stack.push((child.clone(), depth + 1));
        }
    }
    out
}
