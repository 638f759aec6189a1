//! Display Views
//!
//! Transcript model produced by the interpreter and the sinks that consume
//! it. Each submitted line yields one request/response [`Transcript`] entry;
//! rendering to markup or terminal text is the sink's concern.

pub mod render;

pub use render::{escape_markup, ContentTrust, RenderMode, Renderer};

use crate::error::ShellError;
use crate::tree::EntryKind;
use std::io::Write;
use tracing::warn;

/// One child of the active directory in an `ls` listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Response half of a transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Blank,
    Text(String),
    Help,
    Listing(Vec<ListingEntry>),
    Matches(Vec<String>),
    Error(ShellError),
}

/// One request/response block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Working directory at the time the line was submitted
    pub prompt_path: String,
    /// Raw command line; renderers escape it
    pub command: String,
    pub body: ResponseBody,
}

/// Append-only output surface
pub trait DisplaySink {
    fn append(&mut self, entry: Transcript);

    /// Reset the visible buffer (`clear`).
    fn clear(&mut self);

    /// Hide the terminal surface (`exit`).
    fn hide(&mut self);
}

/// Sink that keeps entries in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Vec<Transcript>,
    hidden: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Transcript] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Transcript> {
        self.entries.last()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl DisplaySink for MemorySink {
    fn append(&mut self, entry: Transcript) {
        self.entries.push(entry);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn hide(&mut self) {
        self.hidden = true;
    }
}

/// Sink that renders each entry to a writer
pub struct TextSink<W: Write> {
    writer: W,
    renderer: Renderer,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W, renderer: Renderer) -> Self {
        Self { writer, renderer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_best_effort(&mut self, text: &str) {
        let result = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to display sink");
        }
    }
}

impl<W: Write> DisplaySink for TextSink<W> {
    fn append(&mut self, entry: Transcript) {
        let rendered = self.renderer.render(&entry);
        self.write_best_effort(&rendered);
    }

    fn clear(&mut self) {
        if let Some(sequence) = self.renderer.clear_sequence() {
            self.write_best_effort(sequence);
        }
    }

    fn hide(&mut self) {}
}
