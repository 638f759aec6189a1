//! Tree builder: turns a real directory into a tree document.

use crate::error::ApiError;
use crate::tree::node::FileTreeNode;
use crate::tree::path::FileTree;
use crate::tree::walker::{walk, WalkerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builds a [`FileTree`] from a source directory.
///
/// The source directory becomes the root folder (`/Home`) whatever its own
/// name is. Empty folders are kept.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    source: PathBuf,
    walker_config: WalkerConfig,
}

impl TreeBuilder {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            walker_config: WalkerConfig::default(),
        }
    }

    pub fn with_walker_config(mut self, walker_config: WalkerConfig) -> Self {
        self.walker_config = walker_config;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn walker_config(&self) -> &WalkerConfig {
        &self.walker_config
    }

    /// Walk the source directory and assemble the tree.
    ///
    /// Fails without output if the source is not a directory or any entry
    /// cannot be read.
    pub fn build(&self) -> Result<FileTree, ApiError> {
        let metadata = fs::metadata(&self.source)?;
        if !metadata.is_dir() {
            return Err(ApiError::NotADirectory(self.source.clone()));
        }
        let source = dunce::canonicalize(&self.source)?;

        let mut root = FileTreeNode::root(Vec::new());
        for entry in walk(&source, &self.walker_config) {
            let entry = entry?;
            let relative = entry.path().strip_prefix(&source).map_err(|_| {
                ApiError::InvalidTree(format!("{} escaped the source root", entry.path().display()))
            })?;
            let segments: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let Some((name, parents)) = segments.split_last() else {
                continue;
            };

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                debug!(path = %entry.path().display(), "Skipping symlink");
                continue;
            }

            let parent = folder_mut(&mut root, parents).ok_or_else(|| {
                ApiError::InvalidTree(format!("parent folder missing for {}", relative.display()))
            })?;
            let node = if file_type.is_dir() {
                FileTreeNode::folder(&parent.path, name, Vec::new())
            } else {
                let bytes = fs::read(entry.path())?;
                let content = String::from_utf8_lossy(&bytes).into_owned();
                let executable = is_executable(&entry.metadata().map_err(|e| {
                    ApiError::InvalidTree(format!("cannot stat {}: {}", entry.path().display(), e))
                })?);
                FileTreeNode::file(&parent.path, name, &content, executable)
            };
            parent.add_child(node)?;
        }

        let tree = FileTree::new(root)?;
        let stats = tree.stats();
        info!(
            source = %source.display(),
            folders = stats.folders,
            files = stats.files,
            "Built file tree"
        );
        Ok(tree)
    }

    /// Build and write the tree document to `output`.
    pub fn build_to_file(&self, output: &Path) -> Result<FileTree, ApiError> {
        let tree = self.build()?;
        write_json(&tree, output)?;
        Ok(tree)
    }
}

/// Write a pretty-printed tree document, creating parent directories.
pub fn write_json(tree: &FileTree, output: &Path) -> Result<(), ApiError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, tree.to_json_pretty()?)?;
    Ok(())
}

fn folder_mut<'a>(root: &'a mut FileTreeNode, segments: &[String]) -> Option<&'a mut FileTreeNode> {
    let mut current = root;
    for segment in segments {
        current = current.children_mut()?.get_mut(segment)?;
    }
    current.is_folder().then_some(current)
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    false
}
