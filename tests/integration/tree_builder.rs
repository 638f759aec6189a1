use std::fs;
use tempfile::TempDir;
use termfolio::error::ApiError;
use termfolio::shell::Interpreter;
use termfolio::store::{load_document, TreeSlot};
use termfolio::tree::{TreeBuilder, WalkerConfig};
use termfolio::views::{MemorySink, ResponseBody};

fn portfolio_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("Projects/termfolio")).unwrap();
    fs::create_dir_all(root.join("Empty")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
    fs::write(root.join("about"), "<b>Hi</b>, I build shells.").unwrap();
    fs::write(root.join("Projects/termfolio/README"), "A terminal portfolio").unwrap();
    temp
}

#[test]
fn built_tree_is_navigable() {
    let dir = portfolio_dir();
    let tree = TreeBuilder::new(dir.path().to_path_buf()).build().unwrap();

    let mut session = Interpreter::new(TreeSlot::ready(tree), MemorySink::new());
    session.submit_line("cd Projects/termfolio");
    assert_eq!(session.current_path(), "/Home/Projects/termfolio");
    session.submit_line("cat README");
    assert_eq!(
        session.sink().last().unwrap().body,
        ResponseBody::Text("A terminal portfolio".to_string())
    );
}

#[test]
fn builder_skips_ignored_names_and_keeps_empty_folders() {
    let dir = portfolio_dir();
    let tree = TreeBuilder::new(dir.path().to_path_buf()).build().unwrap();

    assert!(tree.lookup("/Home/.git").is_none());
    let empty = tree.lookup("/Home/Empty").unwrap();
    assert!(empty.is_folder());
    assert_eq!(empty.children().map(|c| c.len()), Some(0));
}

#[test]
fn custom_ignore_list_replaces_defaults() {
    let dir = portfolio_dir();
    let config = WalkerConfig {
        ignore: vec!["Empty".to_string()],
        ..WalkerConfig::default()
    };
    let tree = TreeBuilder::new(dir.path().to_path_buf())
        .with_walker_config(config)
        .build()
        .unwrap();
    assert!(tree.lookup("/Home/Empty").is_none());
    assert!(tree.lookup("/Home/.git/HEAD").is_some());
}

#[test]
fn written_document_round_trips_through_loader() {
    let dir = portfolio_dir();
    let out = TempDir::new().unwrap();
    let output = out.path().join("public/fileTree.json");

    let built = TreeBuilder::new(dir.path().to_path_buf())
        .build_to_file(&output)
        .unwrap();
    let loaded = load_document(&output).unwrap();
    assert_eq!(built, loaded);

    let raw = fs::read_to_string(&output).unwrap();
    assert!(raw.contains("\"data\": \"<b>Hi</b>, I build shells.\""));
}

#[test]
fn non_directory_source_fails_without_output() {
    let dir = portfolio_dir();
    let out = TempDir::new().unwrap();
    let output = out.path().join("fileTree.json");

    let err = TreeBuilder::new(dir.path().join("about"))
        .build_to_file(&output)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotADirectory(_)));
    assert!(!output.exists());
}

#[cfg(unix)]
#[test]
fn execute_bits_mark_files_executable() {
    use std::os::unix::fs::PermissionsExt;
    use termfolio::tree::EntryKind;

    let dir = portfolio_dir();
    let script = dir.path().join("run.sh");
    fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o750)).unwrap();

    let tree = TreeBuilder::new(dir.path().to_path_buf()).build().unwrap();
    assert_eq!(tree.lookup("/Home/run.sh").unwrap().entry_kind(), EntryKind::Executable);
    assert_eq!(tree.lookup("/Home/about").unwrap().entry_kind(), EntryKind::Plain);
}
