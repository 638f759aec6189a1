//! Tab completion of path arguments.

use crate::shell::resolve::resolve_folder;
use crate::tree::{FileTree, FileTreeNode};
use crate::types::{strip_trailing_separator, ROOT_PATH, SEPARATOR};

/// Result of a completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Nothing to complete; the buffer stays as it is
    Noop,
    /// Single match: the full replacement input line
    Replace(String),
    /// Several matches as typed, parent segment kept and folders suffixed with `/`
    Ambiguous(Vec<String>),
    /// No child starts with the search term
    NoMatches(String),
    /// The parent segment of the partial path does not resolve to a folder
    NoSuchDirectory(String),
}

/// Split an input line into its command and first argument.
///
/// Returns `None` when either is missing, in which case completion is a no-op.
pub fn split_request(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line.split_whitespace();
    let command = tokens.next()?;
    let partial = tokens.next()?;
    Some((command, partial))
}

/// Complete the first argument of `line` against the children of a folder.
///
/// A partial argument containing `/` is split at its last separator: the
/// head is resolved relative to `current` and the tail is the search term.
/// Matching is a case-sensitive prefix test.
pub fn complete(tree: &FileTree, current: &str, line: &str) -> CompletionOutcome {
    let Some((command, partial)) = split_request(line) else {
        return CompletionOutcome::Noop;
    };
    let trimmed = strip_trailing_separator(partial);

    let (parent, term, folder) = match trimmed.rsplit_once(SEPARATOR) {
        Some((parent, term)) => match resolve_folder(tree, current, Some(parent)) {
            Ok(resolved) => (Some(parent), term, resolved.node),
            Err(_) => return CompletionOutcome::NoSuchDirectory(parent.to_string()),
        },
        None => (None, trimmed, active_folder(tree, current)),
    };

    let matches: Vec<&FileTreeNode> = folder
        .children()
        .into_iter()
        .flat_map(|children| children.values())
        .filter(|child| child.name.starts_with(term))
        .collect();

    match matches.as_slice() {
        [] => CompletionOutcome::NoMatches(term.to_string()),
        [only] => CompletionOutcome::Replace(format!("{} {}", command, qualified(parent, only))),
        many => CompletionOutcome::Ambiguous(many.iter().map(|node| qualified(parent, node)).collect()),
    }
}

/// Candidate as typed: the parent segment, if any, then the display name.
fn qualified(parent: Option<&str>, node: &FileTreeNode) -> String {
    match parent {
        Some(parent) => format!("{}{}{}", parent, SEPARATOR, display_name(node)),
        None => display_name(node),
    }
}

fn active_folder<'t>(tree: &'t FileTree, current: &str) -> &'t FileTreeNode {
    tree.lookup(current)
        .filter(|node| node.is_folder())
        .unwrap_or_else(|| tree.root())
}

fn display_name(node: &FileTreeNode) -> String {
    if node.is_folder() {
        format!("{}{}", node.name, SEPARATOR)
    } else {
        node.name.clone()
    }
}
