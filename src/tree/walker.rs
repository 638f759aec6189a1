//! Source directory traversal for the tree builder

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Follow symbolic links while walking (default: false)
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Entry names skipped at any depth
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Maximum depth below the source root
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_ignore() -> Vec<String> {
    vec![".DS_Store".to_string(), ".git".to_string()]
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore: default_ignore(),
            max_depth: None,
        }
    }
}

impl WalkerConfig {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == name)
    }
}

/// Walk `root` in pre-order, parents before children, siblings by name.
///
/// The root itself is not yielded.
pub fn walk<'a>(
    root: &Path,
    config: &'a WalkerConfig,
) -> impl Iterator<Item = Result<DirEntry, ApiError>> + 'a {
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name();
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }
    walker
        .into_iter()
        .filter_entry(move |entry| {
            entry.depth() == 0 || !config.is_ignored(&entry.file_name().to_string_lossy())
        })
        .map(|entry| entry.map_err(walk_error))
}

fn walk_error(err: walkdir::Error) -> ApiError {
    let path = err
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    match err.into_io_error() {
        Some(io) => ApiError::Io(io),
        None => ApiError::InvalidTree(format!("filesystem loop detected at {}", path)),
    }
}
