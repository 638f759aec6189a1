//! Command history with a recall cursor.

/// Effect of a recall signal on the input buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    /// Leave the buffer as it is
    Unchanged,
    /// Replace the buffer with a history entry
    Replace(String),
    /// Empty the buffer
    Clear,
}

/// Append-only history of submitted lines.
///
/// The cursor rests at `len()` after every submission and only moves on
/// recall.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted line (empty and invalid lines included) and reset the cursor.
    pub fn record(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.cursor = self.entries.len();
    }

    /// Step back one entry; a no-op at the oldest entry.
    pub fn previous(&mut self) -> Recall {
        if self.cursor == 0 {
            return Recall::Unchanged;
        }
        self.cursor -= 1;
        match self.entries.get(self.cursor) {
            Some(entry) => Recall::Replace(entry.clone()),
            None => Recall::Unchanged,
        }
    }

    /// Step forward one entry; past the newest entry the buffer clears.
    pub fn next(&mut self) -> Recall {
        let next = self.cursor + 1;
        if next >= self.entries.len() {
            self.cursor = self.entries.len();
            return Recall::Clear;
        }
        self.cursor = next;
        Recall::Replace(self.entries[next].clone())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
