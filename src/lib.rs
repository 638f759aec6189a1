//! Termfolio: a Unix-like shell over a static virtual filesystem
//!
//! A pre-built tree of folders and files (a portfolio or résumé site
//! presented as a terminal) is loaded once and browsed with a fixed command
//! vocabulary: `ls`, `cd`, `cat`, `help`, `clear`, `exit`. The crate also
//! builds tree documents from real directories and can reload them live.

pub mod config;
pub mod error;
pub mod logging;
pub mod shell;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod views;
pub mod watch;
