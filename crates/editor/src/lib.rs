// Library crate: the editor core used by the CLI, the wasm bindings and the
// integration tests.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod history;
pub mod shortcuts;
pub mod state;

pub use error::{EditorError, Result};
pub use harness::EditorHarness;
