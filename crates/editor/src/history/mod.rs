//! Undo/redo functionality
//!
//! Commands are executed through [`History`], which keeps a linear stack of
//! applied commands and a queue of undone ones.

pub mod commands;

use std::collections::VecDeque;

pub use commands::{
    AddObject, ChangeMaterialType, DeleteObjects, EditorCommand, RenameObject, ReparentObject,
    TransformObject, UpdateComponent, UpdateMaterialProps,
};

/// Default maximum number of undo entries
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Result of offering the next command to the top of the undo stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The receiver absorbed the next command; drop it
    Merged,
    NotMerged,
}

/// A reversible edit of some target state.
///
/// `execute` is called once when the command is submitted and again on every
/// redo; `undo` must restore the target to what it was before the matching
/// `execute`.
pub trait Command {
    type Target;

    /// Label shown in undo/redo menus
    fn name(&self) -> &str;

    fn execute(&mut self, target: &mut Self::Target);

    fn undo(&mut self, target: &mut Self::Target);

    /// Fold `next` (already executed) into `self` so both are undone together.
    fn try_merge(&mut self, _next: &Self) -> MergeOutcome {
        MergeOutcome::NotMerged
    }
}

/// Linear undo/redo history
#[derive(Debug)]
pub struct History<C: Command> {
    /// Applied commands, oldest first
    past: VecDeque<C>,
    /// Undone commands, next redo first
    future: VecDeque<C>,
    max_entries: usize,
}

impl<C: Command> Default for History<C> {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }
}

impl<C: Command> History<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `max_entries` undo steps (at least one)
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Run `command` and record it, coalescing with the previous entry when
    /// that entry accepts the merge. Any redo history is discarded.
    pub fn execute(&mut self, mut command: C, target: &mut C::Target) {
        command.execute(target);

        let merged = self
            .past
            .back_mut()
            .is_some_and(|top| top.try_merge(&command) == MergeOutcome::Merged);
        if merged {
            tracing::debug!("Merged '{}' into previous entry", command.name());
        } else {
            self.past.push_back(command);
            if self.past.len() > self.max_entries {
                self.past.pop_front();
            }
        }

        self.future.clear();
    }

    /// Undo the most recent command. Returns false if there was nothing to undo.
    pub fn undo(&mut self, target: &mut C::Target) -> bool {
        let Some(mut command) = self.past.pop_back() else {
            return false;
        };
        tracing::debug!("Undo '{}'", command.name());
        command.undo(target);
        self.future.push_front(command);
        true
    }

    /// Re-apply the most recently undone command
    pub fn redo(&mut self, target: &mut C::Target) -> bool {
        let Some(mut command) = self.future.pop_front() else {
            return false;
        };
        tracing::debug!("Redo '{}'", command.name());
        command.execute(target);
        self.past.push_back(command);
        true
    }

    /// Forget everything without invoking any command
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    /// Name of the command the next undo would revert
    pub fn undo_label(&self) -> Option<&str> {
        self.past.back().map(|c| c.name())
    }

    /// Name of the command the next redo would apply
    pub fn redo_label(&self) -> Option<&str> {
        self.future.front().map(|c| c.name())
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
