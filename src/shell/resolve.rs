//! Path resolution relative to the working directory.
//!
//! Resolution is pure: it never changes the session's working directory.
//! Callers decide whether to commit the result.

use crate::error::ShellError;
use crate::tree::{FileTree, FileTreeNode};
use crate::types::{join_path, parent_path, strip_trailing_separator, ROOT_NAME, ROOT_PATH};

/// A successfully resolved path
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'t> {
    /// Canonical absolute path of `node`
    pub path: &'t str,
    pub node: &'t FileTreeNode,
}

/// Resolve `arg` against `current`.
///
/// In priority order: a missing or empty argument is the root; `..` pops
/// one segment (failing at the root); `/`, `/Home` and `Home` are the root;
/// anything else has one trailing `/` stripped and is looked up under
/// `current`. Embedded `..` segments are not interpreted.
pub fn resolve<'t>(
    tree: &'t FileTree,
    current: &str,
    arg: Option<&str>,
) -> Result<Resolved<'t>, ShellError> {
    let arg = match arg {
        None | Some("") => return Ok(root(tree)),
        Some("/") => return Ok(root(tree)),
        Some(arg) => arg,
    };
    let trimmed = strip_trailing_separator(arg);

    if trimmed == ".." {
        let parent = parent_path(current).ok_or(ShellError::NoParentDirectory)?;
        return lookup(tree, parent, arg);
    }
    if trimmed == ROOT_PATH || trimmed == ROOT_NAME {
        return Ok(root(tree));
    }
    lookup(tree, &join_path(current, trimmed), arg)
}

/// Resolve to a folder, as `cd` requires.
pub fn resolve_folder<'t>(
    tree: &'t FileTree,
    current: &str,
    arg: Option<&str>,
) -> Result<Resolved<'t>, ShellError> {
    let resolved = resolve(tree, current, arg).map_err(|e| match e {
        ShellError::NoSuchPath(arg) => ShellError::NoSuchDirectory(arg),
        other => other,
    })?;
    if resolved.node.is_folder() {
        Ok(resolved)
    } else {
        Err(ShellError::NotADirectory(arg.unwrap_or_default().to_string()))
    }
}

/// Resolve to a file, as `cat` requires.
pub fn resolve_file<'t>(
    tree: &'t FileTree,
    current: &str,
    arg: Option<&str>,
) -> Result<Resolved<'t>, ShellError> {
    let arg = match arg {
        None | Some("") => return Err(ShellError::MissingArgument),
        Some(arg) => arg,
    };
    let resolved = resolve(tree, current, Some(arg)).map_err(|e| match e {
        ShellError::NoSuchPath(arg) => ShellError::NoSuchFile(arg),
        other => other,
    })?;
    if resolved.node.is_file() {
        Ok(resolved)
    } else {
        Err(ShellError::NotAFile(arg.to_string()))
    }
}

fn root(tree: &FileTree) -> Resolved<'_> {
    let node = tree.root();
    Resolved {
        path: &node.path,
        node,
    }
}

fn lookup<'t>(tree: &'t FileTree, absolute: &str, arg: &str) -> Result<Resolved<'t>, ShellError> {
    let node = tree
        .lookup(absolute)
        .ok_or_else(|| ShellError::NoSuchPath(arg.to_string()))?;
    Ok(Resolved {
        path: &node.path,
        node,
    })
}
