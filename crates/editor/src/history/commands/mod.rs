//! Concrete editor commands

mod add;
mod component;
mod delete;
mod material;
mod rename;
mod reparent;
mod transform;

pub use add::AddObject;
pub use component::UpdateComponent;
pub use delete::DeleteObjects;
pub use material::{ChangeMaterialType, UpdateMaterialProps};
pub use rename::RenameObject;
pub use reparent::ReparentObject;
pub use transform::TransformObject;

use super::{Command, MergeOutcome};
use crate::state::EditorState;

/// A reversible edit of the editor state
#[derive(Debug, Clone)]
pub enum EditorCommand {
    AddObject(AddObject),
    DeleteObjects(DeleteObjects),
    TransformObject(TransformObject),
    ReparentObject(ReparentObject),
    UpdateComponent(UpdateComponent),
    RenameObject(RenameObject),
    UpdateMaterialProps(UpdateMaterialProps),
    ChangeMaterialType(ChangeMaterialType),
}

macro_rules! dispatch {
    ($self:expr, $cmd:ident => $body:expr) => {
        match $self {
            EditorCommand::AddObject($cmd) => $body,
            EditorCommand::DeleteObjects($cmd) => $body,
            EditorCommand::TransformObject($cmd) => $body,
            EditorCommand::ReparentObject($cmd) => $body,
            EditorCommand::UpdateComponent($cmd) => $body,
            EditorCommand::RenameObject($cmd) => $body,
            EditorCommand::UpdateMaterialProps($cmd) => $body,
            EditorCommand::ChangeMaterialType($cmd) => $body,
        }
    };
}

impl Command for EditorCommand {
    type Target = EditorState;

    fn name(&self) -> &str {
        dispatch!(self, c => c.name())
    }

    fn execute(&mut self, state: &mut EditorState) {
        dispatch!(self, c => c.execute(state))
    }

    fn undo(&mut self, state: &mut EditorState) {
        dispatch!(self, c => c.undo(state))
    }

    fn try_merge(&mut self, next: &Self) -> MergeOutcome {
        match (self, next) {
            (EditorCommand::TransformObject(a), EditorCommand::TransformObject(b)) => a.try_merge(b),
            (EditorCommand::UpdateComponent(a), EditorCommand::UpdateComponent(b)) => a.try_merge(b),
            (EditorCommand::UpdateMaterialProps(a), EditorCommand::UpdateMaterialProps(b)) => {
                a.try_merge(b)
            }
            _ => MergeOutcome::NotMerged,
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for EditorCommand {
                fn from(cmd: $variant) -> Self {
                    EditorCommand::$variant(cmd)
                }
            }
        )*
    };
}

impl_from!(
    AddObject,
    DeleteObjects,
    TransformObject,
    ReparentObject,
    UpdateComponent,
    RenameObject,
    UpdateMaterialProps,
    ChangeMaterialType
);
