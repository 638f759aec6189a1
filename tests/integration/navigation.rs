use super::support::{last_body, sample_session};
use termfolio::error::ShellError;
use termfolio::shell::InputEvent;
use termfolio::tree::EntryKind;
use termfolio::types::ROOT_PATH;
use termfolio::views::{ListingEntry, ResponseBody};

#[test]
fn ls_at_root_lists_descending() {
    let mut session = sample_session();
    session.submit_line("ls");
    assert_eq!(
        last_body(&session),
        ResponseBody::Listing(vec![
            ListingEntry {
                name: "readme".to_string(),
                kind: EntryKind::Plain,
            },
            ListingEntry {
                name: "Docs".to_string(),
                kind: EntryKind::Folder,
            },
        ])
    );
}

#[test]
fn cd_into_folder_and_back() {
    let mut session = sample_session();
    session.submit_line("cd Docs");
    assert_eq!(session.current_path(), "/Home/Docs");
    session.submit_line("cd ..");
    assert_eq!(session.current_path(), ROOT_PATH);
}

#[test]
fn cat_nested_file_from_root() {
    let mut session = sample_session();
    session.submit_line("cat Docs/resume");
    assert_eq!(last_body(&session), ResponseBody::Text("Hello".to_string()));
}

#[test]
fn cat_missing_file_reports_no_such_file() {
    let mut session = sample_session();
    session.submit_line("cat nofile");
    assert_eq!(
        last_body(&session),
        ResponseBody::Error(ShellError::NoSuchFile("nofile".to_string()))
    );
}

#[test]
fn cd_through_a_file_fails() {
    let mut session = sample_session();
    session.submit_line("cd Docs/readme");
    assert_eq!(
        last_body(&session),
        ResponseBody::Error(ShellError::NoSuchDirectory("Docs/readme".to_string()))
    );
    session.submit_line("cd readme");
    assert_eq!(
        last_body(&session),
        ResponseBody::Error(ShellError::NotADirectory("readme".to_string()))
    );
    assert_eq!(session.current_path(), ROOT_PATH);
}

#[test]
fn cd_without_argument_returns_to_root() {
    let mut session = sample_session();
    session.submit_line("cd Docs");
    session.submit_line("cd");
    assert_eq!(session.current_path(), ROOT_PATH);
}

#[test]
fn root_aliases_from_nested_directory() {
    for alias in ["/", "/Home", "Home", "Home/", "/Home/"] {
        let mut session = sample_session();
        session.submit_line("cd Docs");
        session.submit_line(&format!("cd {}", alias));
        assert_eq!(session.current_path(), ROOT_PATH, "alias {}", alias);
    }
}

#[test]
fn cd_parent_at_root_fails_without_moving() {
    let mut session = sample_session();
    session.submit_line("cd ..");
    assert_eq!(
        last_body(&session),
        ResponseBody::Error(ShellError::NoParentDirectory)
    );
    assert_eq!(session.current_path(), ROOT_PATH);
}

#[test]
fn embedded_parent_segments_are_not_interpreted() {
    let mut session = sample_session();
    session.submit_line("cd Docs/../Docs");
    assert_eq!(
        last_body(&session),
        ResponseBody::Error(ShellError::NoSuchDirectory("Docs/../Docs".to_string()))
    );
}

#[test]
fn unknown_command_is_reported() {
    let mut session = sample_session();
    session.submit_line("gui");
    assert_eq!(
        last_body(&session),
        ResponseBody::Error(ShellError::UnrecognizedCommand("gui".to_string()))
    );
    assert_eq!(
        ShellError::UnrecognizedCommand("gui".to_string()).to_string(),
        "Command not found: gui"
    );
}

#[test]
fn every_submission_lands_in_history() {
    let mut session = sample_session();
    for line in ["", "bogus", "ls", "cat"] {
        session.set_input(line);
        session.handle(InputEvent::Submit);
    }
    assert_eq!(session.history().entries(), &["", "bogus", "ls", "cat"]);
    assert_eq!(session.history().cursor(), 4);
    assert_eq!(session.input(), "");
}
