//! Property tests over generated trees.

use proptest::prelude::*;
use std::collections::BTreeSet;
use termfolio::shell::{complete, listing, resolve, CompletionOutcome, Interpreter};
use termfolio::store::TreeSlot;
use termfolio::tree::{FileTree, FileTreeNode};
use termfolio::types::{join_path, ROOT_PATH};
use termfolio::views::MemorySink;

/// A folder chain `/Home/<c0>/<c1>/...` where every folder also holds the
/// given sibling files.
fn chain_tree(chain: &[String], files: &BTreeSet<String>) -> FileTree {
    fn level(parent: &str, chain: &[String], files: &BTreeSet<String>) -> Vec<FileTreeNode> {
        let mut children: Vec<FileTreeNode> = files
            .iter()
            .filter(|name| chain.first() != Some(*name))
            .map(|name| FileTreeNode::file(parent, name, "x", false))
            .collect();
        if let Some((head, rest)) = chain.split_first() {
            let path = join_path(parent, head);
            children.push(FileTreeNode::folder(parent, head, level(&path, rest, files)));
        }
        children
    }
    FileTree::new(FileTreeNode::root(level(ROOT_PATH, chain, files))).unwrap()
}

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,7}".prop_filter("root name", |s| s != "Home")
}

proptest! {
    #[test]
    fn cd_down_then_up_returns_to_root(
        chain in prop::collection::vec(segment(), 1..6),
        files in prop::collection::btree_set(segment(), 0..4),
    ) {
        let tree = chain_tree(&chain, &files);
        let mut session = Interpreter::new(TreeSlot::ready(tree), MemorySink::new());
        for name in &chain {
            session.submit_line(&format!("cd {}", name));
        }
        let depth = session.current_path().matches('/').count() - 1;
        prop_assert_eq!(depth, chain.len());
        for _ in 0..depth {
            session.submit_line("cd ..");
        }
        prop_assert_eq!(session.current_path(), ROOT_PATH);
    }

    #[test]
    fn root_aliases_always_resolve_to_root(
        chain in prop::collection::vec(segment(), 0..5),
        alias in prop::sample::select(vec!["/", "/Home", "Home", "Home/", "/Home/"]),
    ) {
        let tree = chain_tree(&chain, &BTreeSet::new());
        let current = chain.iter().fold(ROOT_PATH.to_string(), |p, s| join_path(&p, s));
        let resolved = resolve(&tree, &current, Some(alias)).unwrap();
        prop_assert_eq!(resolved.path, ROOT_PATH);
    }

    #[test]
    fn lookup_is_total_and_exact(
        chain in prop::collection::vec(segment(), 0..5),
        probe in prop::collection::vec(segment(), 0..6),
    ) {
        let tree = chain_tree(&chain, &BTreeSet::new());
        let path = probe.iter().fold(ROOT_PATH.to_string(), |p, s| join_path(&p, s));
        if let Some(node) = tree.lookup(&path) {
            prop_assert_eq!(&node.path, &path);
        }
    }

    #[test]
    fn listing_has_one_entry_per_child(
        files in prop::collection::btree_set(segment(), 0..12),
    ) {
        let tree = chain_tree(&[], &files);
        let entries = listing(&tree, ROOT_PATH);
        let names: BTreeSet<String> = entries.iter().map(|e| e.name.clone()).collect();
        prop_assert_eq!(entries.len(), files.len());
        prop_assert_eq!(names, files);
    }

    #[test]
    fn unique_completion_is_deterministic(
        files in prop::collection::btree_set(segment(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let tree = chain_tree(&[], &files);
        let names: Vec<&String> = files.iter().collect();
        let target = names[pick.index(names.len())];
        let line = format!("cat {}", target);
        let first = complete(&tree, ROOT_PATH, &line);
        prop_assert_eq!(&first, &complete(&tree, ROOT_PATH, &line));

        let extends_other = names.iter().any(|n| *n != target && n.starts_with(target.as_str()));
        if !extends_other {
            prop_assert_eq!(first, CompletionOutcome::Replace(format!("cat {}", target)));
        }
    }
}
