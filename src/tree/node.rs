//! Virtual filesystem node types and their document mapping

use crate::error::ApiError;
use crate::types::{join_path, ROOT_NAME, ROOT_PATH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single node of the virtual filesystem.
///
/// Serialized as `{"name", "type", "path", ...}` where the remaining fields
/// depend on `type`: folders carry `children`, files carry `data` and
/// `executable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeNode {
    pub name: String,
    pub path: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Folder or file payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Folder {
        #[serde(default)]
        children: BTreeMap<String, FileTreeNode>,
    },
    File {
        #[serde(rename = "data", alias = "content", default)]
        content: String,
        #[serde(default)]
        executable: bool,
    },
}

/// Listing classification of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Folder,
    Executable,
    Plain,
}

impl FileTreeNode {
    /// Root folder with the given children.
    pub fn root(children: Vec<FileTreeNode>) -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            path: ROOT_PATH.to_string(),
            kind: NodeKind::Folder {
                children: collect_children(children),
            },
        }
    }

    /// Folder named `name` under the folder at `parent_path`.
    pub fn folder(parent_path: &str, name: &str, children: Vec<FileTreeNode>) -> Self {
        Self {
            name: name.to_string(),
            path: join_path(parent_path, name),
            kind: NodeKind::Folder {
                children: collect_children(children),
            },
        }
    }

    /// File named `name` under the folder at `parent_path`.
    pub fn file(parent_path: &str, name: &str, content: &str, executable: bool) -> Self {
        Self {
            name: name.to_string(),
            path: join_path(parent_path, name),
            kind: NodeKind::File {
                content: content.to_string(),
                executable,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Children of a folder; `None` for files.
    pub fn children(&self) -> Option<&BTreeMap<String, FileTreeNode>> {
        match &self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, FileTreeNode>> {
        match &mut self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    /// Direct child by name.
    pub fn child(&self, name: &str) -> Option<&FileTreeNode> {
        self.children().and_then(|children| children.get(name))
    }

    /// File content; `None` for folders.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content, .. } => Some(content),
            NodeKind::Folder { .. } => None,
        }
    }

    pub fn is_executable(&self) -> bool {
        matches!(self.kind, NodeKind::File { executable: true, .. })
    }

    pub fn entry_kind(&self) -> EntryKind {
        match &self.kind {
            NodeKind::Folder { .. } => EntryKind::Folder,
            NodeKind::File { executable: true, .. } => EntryKind::Executable,
            NodeKind::File { .. } => EntryKind::Plain,
        }
    }

    /// Attach `child` to this folder, keyed by its name.
    pub fn add_child(&mut self, child: FileTreeNode) -> Result<(), ApiError> {
        let parent = self.path.clone();
        let children = self
            .children_mut()
            .ok_or_else(|| ApiError::InvalidTree(format!("{} is a file, not a folder", parent)))?;
        children.insert(child.name.clone(), child);
        Ok(())
    }
}

fn collect_children(children: Vec<FileTreeNode>) -> BTreeMap<String, FileTreeNode> {
    children
        .into_iter()
        .map(|child| (child.name.clone(), child))
        .collect()
}
