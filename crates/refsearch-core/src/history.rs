//! Branching back/forward navigation over queries.
//!
//! The standard browser rule: pushing a *new* query after going back discards
//! the old forward branch. One `History` per logical session; never shared.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<String>,
    /// Index of the entry the user is currently viewing. `None` iff empty.
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|i| self.entries[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(i) if i > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(i) if i + 1 < self.entries.len())
    }

    /// Record `query` as the new current entry, truncating any forward
    /// branch. Pushing the entry already under the cursor is a no-op.
    pub fn push(&mut self, query: &str) {
        if self.current() == Some(query) {
            return;
        }
        match self.cursor {
            Some(i) => self.entries.truncate(i + 1),
            None => self.entries.clear(),
        }
        self.entries.push(query.to_string());
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Move one entry back; no-op at the start. Returns the new current entry.
    pub fn back(&mut self) -> Option<&str> {
        if let Some(i) = self.cursor {
            if i > 0 {
                self.cursor = Some(i - 1);
            }
        }
        self.current()
    }

    /// Move one entry forward; no-op at the end. Returns the new current entry.
    pub fn forward(&mut self) -> Option<&str> {
        if let Some(i) = self.cursor {
            if i + 1 < self.entries.len() {
                self.cursor = Some(i + 1);
            }
        }
        self.current()
    }
}
