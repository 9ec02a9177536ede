//! Keyboard shortcut registry
//!
//! Chords are strings built from the pressed modifiers and the physical key
//! code, e.g. `"Ctrl+Shift+KeyZ"`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Editor action a shortcut triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutActionType {
    /// Delete the selection through the history
    Delete,
    /// Remove the selection directly from the store, bypassing history
    DeleteImmediate,
    SelectAll,
    Undo,
    Redo,
    /// Reset the selection's transforms to identity
    ResetTransform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutAction {
    pub action: ShortcutActionType,
    /// Higher sorts first in listings
    pub priority: u8,
    #[serde(default)]
    pub requires_selection: bool,
}

impl ShortcutAction {
    pub fn new(action: ShortcutActionType, priority: u8, requires_selection: bool) -> Self {
        Self {
            action,
            priority,
            requires_selection,
        }
    }
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }
}

/// Build a chord string: modifiers in `Ctrl+Shift+Alt` order, then the key code
pub fn chord(modifiers: Modifiers, code: &str) -> String {
    let mut out = String::new();
    if modifiers.ctrl {
        out.push_str("Ctrl+");
    }
    if modifiers.shift {
        out.push_str("Shift+");
    }
    if modifiers.alt {
        out.push_str("Alt+");
    }
    out.push_str(code);
    out
}

/// Chord → action table
#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutRegistry {
    bindings: HashMap<String, ShortcutAction>,
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        use ShortcutActionType::*;

        let mut registry = Self::empty();
        registry.bind("Delete", ShortcutAction::new(Delete, 2, true));
        registry.bind("Backspace", ShortcutAction::new(Delete, 2, true));
        registry.bind("Shift+Delete", ShortcutAction::new(DeleteImmediate, 3, true));
        registry.bind("Shift+KeyR", ShortcutAction::new(ResetTransform, 3, true));
        registry.bind("Ctrl+KeyA", ShortcutAction::new(SelectAll, 3, false));
        registry.bind("Ctrl+KeyZ", ShortcutAction::new(Undo, 3, false));
        registry.bind("Ctrl+KeyY", ShortcutAction::new(Redo, 3, false));
        registry.bind("Ctrl+Shift+KeyZ", ShortcutAction::new(Redo, 4, false));
        registry
    }
}

impl ShortcutRegistry {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a chord, replacing any previous binding
    pub fn bind(&mut self, chord: impl Into<String>, action: ShortcutAction) {
        self.bindings.insert(chord.into(), action);
    }

    pub fn unbind(&mut self, chord: &str) -> Option<ShortcutAction> {
        self.bindings.remove(chord)
    }

    pub fn get(&self, chord: &str) -> Option<&ShortcutAction> {
        self.bindings.get(chord)
    }

    /// Look up a key press
    pub fn resolve(&self, modifiers: Modifiers, code: &str) -> Option<&ShortcutAction> {
        self.get(&chord(modifiers, code))
    }

    /// All bindings, highest priority first, then by chord
    pub fn bindings(&self) -> Vec<(&str, &ShortcutAction)> {
        let mut list: Vec<(&str, &ShortcutAction)> = self
            .bindings
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        list.sort_by(|a, b| b.1.priority.cmp(&a.1.priority).then(a.0.cmp(b.0)));
        list
    }
}
