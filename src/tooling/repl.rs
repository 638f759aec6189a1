//! Interactive shell session.
//!
//! Reads lines with `dialoguer`, wiring its history and completion hooks to
//! the interpreter. When stdin is not a terminal, lines are read verbatim
//! and submitted one by one.

use crate::error::ApiError;
use crate::shell::{CompletionOutcome, Interpreter};
use crate::store::{load_into, TreeSlot, TreeSource};
use crate::tooling::cli::runtime;
use crate::views::{DisplaySink, Renderer, TextSink};
use crate::watch::{ReloadPlan, TreeWatcher, WatchConfig};
use dialoguer::theme::Theme;
use dialoguer::{Completion, History, Input};
use std::fmt;
use std::io::{BufRead, IsTerminal, Stdout};
use tracing::{debug, warn};

/// Session settings
pub struct ShellOptions {
    pub renderer: Renderer,
    pub prompt: String,
    /// Reload the tree on source changes
    pub reload: Option<ReloadPlan>,
}

/// Run a shell session until `exit` or end of input.
///
/// The tree loads in the background; commands issued before it is ready
/// report "System not ready".
pub fn run_shell(source: Box<dyn TreeSource>, options: ShellOptions) -> Result<(), ApiError> {
    let rt = runtime()?;
    let slot = TreeSlot::new();

    let load_slot = slot.clone();
    rt.spawn(async move {
        let _ = load_into(&load_slot, source.as_ref()).await;
    });

    let watch = match options.reload {
        Some(plan) => Some(TreeWatcher::new(slot.clone(), plan, WatchConfig::default()).spawn()?),
        None => None,
    };

    let sink = TextSink::new(std::io::stdout(), options.renderer);
    let mut interpreter = Interpreter::new(slot, sink);

    let result = if std::io::stdin().is_terminal() {
        interactive_loop(&mut interpreter, &options.prompt)
    } else {
        piped_loop(&mut interpreter)
    };

    if let Some(handle) = watch {
        handle.stop();
    }
    debug!("Shell session ended");
    result
}

fn interactive_loop(
    interpreter: &mut Interpreter<TextSink<Stdout>>,
    prompt: &str,
) -> Result<(), ApiError> {
    while !interpreter.is_hidden() {
        let line = {
            let completer = PathCompleter {
                interpreter: &*interpreter,
            };
            let mut recall = RecallHistory {
                entries: interpreter.history().entries(),
            };
            Input::<String>::with_theme(&PromptTheme)
                .with_prompt(format!("{}{}", interpreter.current_path(), prompt))
                .allow_empty(true)
                .report(false)
                .history_with(&mut recall)
                .completion_with(&completer)
                .interact_text()
                .map_err(|e| {
                    ApiError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Failed to get user input: {}", e),
                    ))
                })?
        };
        interpreter.submit_line(&line);
    }
    Ok(())
}

fn piped_loop<S: DisplaySink>(interpreter: &mut Interpreter<S>) -> Result<(), ApiError> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        interpreter.submit_line(&line);
        if interpreter.is_hidden() {
            break;
        }
    }
    Ok(())
}

/// Prompt rendered as `<path><prompt> ` without the default colon.
struct PromptTheme;

impl Theme for PromptTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{} ", prompt)
    }
}

/// Up/down recall over the interpreter's history.
///
/// The interpreter records every submitted line itself, so writes are ignored.
struct RecallHistory<'a> {
    entries: &'a [String],
}

impl History<String> for RecallHistory<'_> {
    fn read(&self, pos: usize) -> Option<String> {
        self.entries.iter().rev().nth(pos).cloned()
    }

    fn write(&mut self, _val: &String) {}
}

/// Tab completion backed by the interpreter.
///
/// The line editor can only replace its buffer, so ambiguous and failed
/// completions leave the input untouched here.
struct PathCompleter<'a, S: DisplaySink> {
    interpreter: &'a Interpreter<S>,
}

impl<S: DisplaySink> Completion for PathCompleter<'_, S> {
    fn get(&self, input: &str) -> Option<String> {
        match self.interpreter.preview_completion(input) {
            Ok(CompletionOutcome::Replace(line)) => Some(line),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Completion unavailable");
                None
            }
        }
    }
}
