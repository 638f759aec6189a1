//! Tree lookup and validated tree wrapper.

use crate::error::ApiError;
use crate::tree::node::{FileTreeNode, NodeKind};
use crate::types::{join_path, ROOT_NAME, ROOT_PATH, SEPARATOR};
use serde::Serialize;

/// Immutable, validated virtual filesystem.
///
/// Construction checks the structural invariants: the root is a folder at
/// `/Home`, every child key equals the child's name, and every path equals
/// `parent.path + "/" + name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTree {
    root: FileTreeNode,
}

/// Node counts for a loaded tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub folders: usize,
    pub files: usize,
    pub executables: usize,
    pub max_depth: usize,
}

impl FileTree {
    pub fn new(root: FileTreeNode) -> Result<Self, ApiError> {
        if root.path != ROOT_PATH {
            return Err(ApiError::InvalidTree(format!(
                "root path must be {}, got {}",
                ROOT_PATH, root.path
            )));
        }
        if !root.is_folder() {
            return Err(ApiError::InvalidTree("root must be a folder".to_string()));
        }
        validate_children(&root)?;
        Ok(Self { root })
    }

    /// Parse and validate a tree document.
    pub fn from_json(document: &str) -> Result<Self, ApiError> {
        let root: FileTreeNode = serde_json::from_str(document)?;
        Self::new(root)
    }

    pub fn from_slice(document: &[u8]) -> Result<Self, ApiError> {
        let root: FileTreeNode = serde_json::from_slice(document)?;
        Self::new(root)
    }

    /// Pretty-printed tree document.
    pub fn to_json_pretty(&self) -> Result<String, ApiError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn root(&self) -> &FileTreeNode {
        &self.root
    }

    /// Walk `path` from the root.
    ///
    /// Empty segments are discarded, as is a leading segment equal to the
    /// root's display name. Returns `None` as soon as a segment is missing
    /// or a file is reached with segments remaining.
    pub fn lookup(&self, path: &str) -> Option<&FileTreeNode> {
        let mut segments = path.split(SEPARATOR).filter(|s| !s.is_empty()).peekable();
        if segments.peek() == Some(&ROOT_NAME) {
            segments.next();
        }
        let mut current = &self.root;
        for segment in segments {
            current = current.child(segment)?;
        }
        Some(current)
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        collect_stats(&self.root, 0, &mut stats);
        stats
    }
}

fn validate_children(node: &FileTreeNode) -> Result<(), ApiError> {
    let Some(children) = node.children() else {
        return Ok(());
    };
    for (key, child) in children {
        if key.is_empty() || key.contains(SEPARATOR) {
            return Err(ApiError::InvalidTree(format!(
                "invalid child name {:?} under {}",
                key, node.path
            )));
        }
        if &child.name != key {
            return Err(ApiError::InvalidTree(format!(
                "child key {:?} does not match node name {:?} under {}",
                key, child.name, node.path
            )));
        }
        let expected = join_path(&node.path, key);
        if child.path != expected {
            return Err(ApiError::InvalidTree(format!(
                "node path {} should be {}",
                child.path, expected
            )));
        }
        validate_children(child)?;
    }
    Ok(())
}

fn collect_stats(node: &FileTreeNode, depth: usize, stats: &mut TreeStats) {
    stats.max_depth = stats.max_depth.max(depth);
    match &node.kind {
        NodeKind::Folder { children } => {
            stats.folders += 1;
            for child in children.values() {
                collect_stats(child, depth + 1, stats);
            }
        }
        NodeKind::File { executable, .. } => {
            stats.files += 1;
            if *executable {
                stats.executables += 1;
            }
        }
    }
}
