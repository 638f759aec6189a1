//! Shell
//!
//! Command interpreter over a loaded [`FileTree`](crate::tree::FileTree):
//! tokenizing, path resolution, tab completion, and history recall.

pub mod command;
pub mod completion;
pub mod help;
pub mod history;
pub mod interpreter;
pub mod resolve;

pub use command::Command;
pub use completion::{complete, CompletionOutcome};
pub use history::{CommandHistory, Recall};
pub use interpreter::{listing, InputEvent, Interpreter};
pub use resolve::{resolve, resolve_file, resolve_folder, Resolved};
