//! Tooling & Integration Layer
//!
//! Command-line entry points: tree building and checking, one-shot
//! command execution, and the interactive shell.

pub mod cli;
pub mod repl;

pub use cli::{Cli, CliContext, Commands, SourceArgs};
pub use repl::{run_shell, ShellOptions};
