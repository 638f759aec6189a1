//! Core types and constants for the virtual filesystem.

/// Display name of the root folder.
pub const ROOT_NAME: &str = "Home";

/// Canonical absolute path of the root folder.
pub const ROOT_PATH: &str = "/Home";

/// Path segment separator.
pub const SEPARATOR: char = '/';

/// Join a parent path and a child segment.
pub fn join_path(parent: &str, name: &str) -> String {
    format!("{}{}{}", parent, SEPARATOR, name)
}

/// Parent of an absolute path, or `None` at the root.
///
/// Pops the last `/`-delimited segment; does not consult the tree.
pub fn parent_path(path: &str) -> Option<&str> {
    if path == ROOT_PATH {
        return None;
    }
    match path.rfind(SEPARATOR) {
        Some(0) | None => None,
        Some(idx) => Some(&path[..idx]),
    }
}

/// Strip exactly one trailing separator, keeping a lone `/` intact.
pub fn strip_trailing_separator(arg: &str) -> &str {
    if arg.len() > 1 {
        arg.strip_suffix(SEPARATOR).unwrap_or(arg)
    } else {
        arg
    }
}
