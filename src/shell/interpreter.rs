//! Session state and command dispatch.
//!
//! An [`Interpreter`] owns the working directory, the command history and
//! the input buffer, and reads the tree through a shared [`TreeSlot`].
//! Every event runs to completion before the next one is accepted.

use crate::error::ShellError;
use crate::shell::command::Command;
use crate::shell::completion::{self, CompletionOutcome};
use crate::shell::history::{CommandHistory, Recall};
use crate::shell::resolve::{resolve_file, resolve_folder};
use crate::store::{TreeSlot, TreeState};
use crate::tree::FileTree;
use crate::types::ROOT_PATH;
use crate::views::{DisplaySink, ListingEntry, ResponseBody, Transcript};
use std::sync::Arc;
use tracing::{debug, warn};

/// Control signals from the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Submit,
    CompletionRequest,
    RecallPrevious,
    RecallNext,
}

/// Single-session command interpreter
pub struct Interpreter<S: DisplaySink> {
    tree: TreeSlot,
    current_path: String,
    history: CommandHistory,
    input: String,
    sink: S,
    hidden: bool,
}

impl<S: DisplaySink> Interpreter<S> {
    /// Start a session at the root.
    ///
    /// The slot may still be loading; filesystem commands are rejected
    /// until it becomes ready.
    pub fn new(tree: TreeSlot, sink: S) -> Self {
        Self {
            tree,
            current_path: ROOT_PATH.to_string(),
            history: CommandHistory::new(),
            input: String::new(),
            sink,
            hidden: false,
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Whether `exit` has hidden the terminal surface.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Submit => self.submit(),
            InputEvent::CompletionRequest => self.complete(),
            InputEvent::RecallPrevious => self.recall_previous(),
            InputEvent::RecallNext => self.recall_next(),
        }
    }

    /// Submit the current input buffer.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.submit_line(&line);
    }

    /// Execute one line.
    ///
    /// Always records the line in history and clears the input buffer,
    /// whatever the outcome.
    pub fn submit_line(&mut self, line: &str) {
        let prompt_path = self.current_path.clone();
        let command = Command::parse(line);
        debug!(command = command.name(), path = %prompt_path, "Dispatching command");

        let body = self.dispatch(&command);

        self.history.record(line);
        self.input.clear();

        if let Some(body) = body {
            if let ResponseBody::Error(err) = &body {
                debug!(command = command.name(), error = %err, "Command failed");
            }
            self.sink.append(Transcript {
                prompt_path,
                command: line.to_string(),
                body,
            });
        }
    }

    /// Complete the current input buffer in place.
    pub fn complete(&mut self) {
        let line = self.input.clone();
        let outcome = match self.preview_completion(&line) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.append_notice(ResponseBody::Error(err));
                return;
            }
        };
        match outcome {
            CompletionOutcome::Noop => {}
            CompletionOutcome::Replace(replacement) => self.input = replacement,
            CompletionOutcome::Ambiguous(matches) => {
                self.append_notice(ResponseBody::Matches(matches))
            }
            CompletionOutcome::NoMatches(term) => {
                self.append_notice(ResponseBody::Text(format!("No matches found for: {}", term)))
            }
            CompletionOutcome::NoSuchDirectory(parent) => {
                self.append_notice(ResponseBody::Text(format!("No such directory: {}", parent)))
            }
        }
    }

    /// Compute a completion for `line` without touching session state.
    pub fn preview_completion(&self, line: &str) -> Result<CompletionOutcome, ShellError> {
        if completion::split_request(line).is_none() {
            return Ok(CompletionOutcome::Noop);
        }
        let tree = self.loaded_tree()?;
        let current = self.effective_path(&tree);
        Ok(completion::complete(&tree, current, line))
    }

    pub fn recall_previous(&mut self) {
        let recall = self.history.previous();
        self.apply_recall(recall);
    }

    pub fn recall_next(&mut self) {
        let recall = self.history.next();
        self.apply_recall(recall);
    }

    fn apply_recall(&mut self, recall: Recall) {
        match recall {
            Recall::Unchanged => {}
            Recall::Replace(entry) => self.input = entry,
            Recall::Clear => self.input.clear(),
        }
    }

    fn dispatch(&mut self, command: &Command) -> Option<ResponseBody> {
        match command {
            Command::Empty => Some(ResponseBody::Blank),
            Command::Clear => {
                self.sink.clear();
                None
            }
            Command::Help => Some(ResponseBody::Help),
            Command::Exit => {
                self.sink.hide();
                self.hidden = true;
                None
            }
            Command::Unknown(name) => Some(ResponseBody::Error(
                ShellError::UnrecognizedCommand(name.clone()),
            )),
            Command::Cat(arg) => Some(self.cat(arg.as_deref()).unwrap_or_else(ResponseBody::Error)),
            Command::Ls => Some(self.ls().unwrap_or_else(ResponseBody::Error)),
            Command::Cd(arg) => Some(self.cd(arg.as_deref()).unwrap_or_else(ResponseBody::Error)),
        }
    }

    fn cat(&mut self, arg: Option<&str>) -> Result<ResponseBody, ShellError> {
        let tree = self.synced_tree()?;
        let resolved = resolve_file(&tree, &self.current_path, arg)?;
        Ok(ResponseBody::Text(
            resolved.node.content().unwrap_or_default().to_string(),
        ))
    }

    fn ls(&mut self) -> Result<ResponseBody, ShellError> {
        let tree = self.synced_tree()?;
        Ok(ResponseBody::Listing(listing(&tree, &self.current_path)))
    }

    fn cd(&mut self, arg: Option<&str>) -> Result<ResponseBody, ShellError> {
        let tree = self.synced_tree()?;
        let resolved = resolve_folder(&tree, &self.current_path, arg)?;
        self.current_path = resolved.path.to_string();
        Ok(ResponseBody::Blank)
    }

    /// Loaded tree, with the working directory checked against it.
    fn synced_tree(&mut self) -> Result<Arc<FileTree>, ShellError> {
        let tree = self.loaded_tree()?;
        self.sync_cursor(&tree);
        Ok(tree)
    }

    fn loaded_tree(&self) -> Result<Arc<FileTree>, ShellError> {
        match self.tree.snapshot() {
            TreeState::Ready(tree) => Ok(tree),
            TreeState::Loading => Err(ShellError::SystemNotReady),
            TreeState::Unavailable(reason) => Err(ShellError::FileSystemUnavailable(reason)),
        }
    }

    /// Working directory if it still names a folder, else the root.
    fn effective_path<'a>(&'a self, tree: &FileTree) -> &'a str {
        match tree.lookup(&self.current_path) {
            Some(node) if node.is_folder() => &self.current_path,
            _ => ROOT_PATH,
        }
    }

    /// Reset the working directory if a reload removed it.
    fn sync_cursor(&mut self, tree: &FileTree) {
        if self.effective_path(tree) != self.current_path {
            warn!(path = %self.current_path, "Working directory vanished after reload, returning to root");
            self.current_path = ROOT_PATH.to_string();
        }
    }

    fn append_notice(&mut self, body: ResponseBody) {
        self.sink.append(Transcript {
            prompt_path: self.current_path.clone(),
            command: String::new(),
            body,
        });
    }
}

/// Children of the folder at `path`, sorted by name descending.
///
/// Names compare case-insensitively with a byte-wise tie-break.
pub fn listing(tree: &FileTree, path: &str) -> Vec<ListingEntry> {
    let mut entries: Vec<ListingEntry> = tree
        .lookup(path)
        .and_then(|node| node.children())
        .into_iter()
        .flat_map(|children| children.values())
        .map(|child| ListingEntry {
            name: child.name.clone(),
            kind: child.entry_kind(),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.name
            .to_lowercase()
            .cmp(&a.name.to_lowercase())
            .then_with(|| b.name.cmp(&a.name))
    });
    entries
}
