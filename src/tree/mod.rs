//! Virtual filesystem tree: node model, lookup, and the directory builder.

pub mod builder;
pub mod node;
pub mod path;
pub mod walker;

pub use builder::TreeBuilder;
pub use node::{EntryKind, FileTreeNode, NodeKind};
pub use path::{FileTree, TreeStats};
pub use walker::WalkerConfig;
