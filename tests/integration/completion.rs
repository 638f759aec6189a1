use super::support::{sample_session, sample_tree};
use termfolio::shell::{complete, CompletionOutcome, InputEvent};
use termfolio::types::ROOT_PATH;
use termfolio::views::ResponseBody;

#[test]
fn unique_folder_match_rewrites_buffer() {
    let mut session = sample_session();
    session.set_input("cat Do");
    session.handle(InputEvent::CompletionRequest);
    assert_eq!(session.input(), "cat Docs/");
}

#[test]
fn completion_chains_into_nested_folder() {
    let mut session = sample_session();
    session.set_input("cat Docs/r");
    session.handle(InputEvent::CompletionRequest);
    assert_eq!(session.input(), "cat Docs/resume");
}

#[test]
fn unknown_parent_reports_no_such_directory() {
    let mut session = sample_session();
    session.set_input("cat Nope/x");
    session.handle(InputEvent::CompletionRequest);
    assert_eq!(session.input(), "cat Nope/x");
    let entry = session.sink().last().unwrap();
    assert_eq!(
        entry.body,
        ResponseBody::Text("No such directory: Nope".to_string())
    );
}

#[test]
fn command_alone_is_a_noop() {
    let tree = sample_tree();
    assert_eq!(complete(&tree, ROOT_PATH, "cat"), CompletionOutcome::Noop);
    let mut session = sample_session();
    session.set_input("ls");
    session.handle(InputEvent::CompletionRequest);
    assert_eq!(session.input(), "ls");
    assert!(session.sink().entries().is_empty());
}

#[test]
fn completion_ignores_command_validity() {
    let tree = sample_tree();
    assert_eq!(
        complete(&tree, ROOT_PATH, "frobnicate re"),
        CompletionOutcome::Replace("frobnicate readme".to_string())
    );
}
