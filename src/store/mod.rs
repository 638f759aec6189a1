//! Tree Store
//!
//! Holds the loaded tree behind a shared slot. The slot starts out `Loading`,
//! becomes `Ready` once a document has been fetched and validated, or
//! `Unavailable` if the load failed. Readers take cheap snapshots; only
//! loaders and the reload watcher write.

pub mod source;

pub use source::{load_document, load_into, DirectorySource, FileSource, HttpSource, TreeSource};

use crate::tree::FileTree;
use parking_lot::RwLock;
use std::sync::Arc;

/// Load state of the virtual filesystem
#[derive(Debug, Clone)]
pub enum TreeState {
    Loading,
    Ready(Arc<FileTree>),
    Unavailable(String),
}

/// Shared handle to the current [`TreeState`]
#[derive(Debug, Clone)]
pub struct TreeSlot {
    state: Arc<RwLock<TreeState>>,
}

impl TreeSlot {
    /// Empty slot in the `Loading` state.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(TreeState::Loading)),
        }
    }

    /// Slot that is already `Ready`.
    pub fn ready(tree: FileTree) -> Self {
        Self {
            state: Arc::new(RwLock::new(TreeState::Ready(Arc::new(tree)))),
        }
    }

    pub fn snapshot(&self) -> TreeState {
        self.state.read().clone()
    }

    /// Current tree, if one is installed.
    pub fn tree(&self) -> Option<Arc<FileTree>> {
        match &*self.state.read() {
            TreeState::Ready(tree) => Some(Arc::clone(tree)),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), TreeState::Ready(_))
    }

    /// Install a freshly loaded tree, replacing any previous state.
    pub fn install(&self, tree: FileTree) {
        *self.state.write() = TreeState::Ready(Arc::new(tree));
    }

    /// Record a load failure.
    pub fn fail(&self, reason: impl Into<String>) {
        *self.state.write() = TreeState::Unavailable(reason.into());
    }
}

impl Default for TreeSlot {
    fn default() -> Self {
        Self::new()
    }
}
