//! # Command History
//!
//! Append-only, capacity-bounded list of submitted command lines with a
//! recall cursor. The list is persisted as a JSON array; persistence
//! failures degrade to in-memory behavior without surfacing an error.

use std::collections::VecDeque;

use crate::config::{HISTORY_CAPACITY, HISTORY_KEY};
use crate::repl::services::KeyValueStore;

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
    /// Recall position; `entries.len()` means "editing a fresh line"
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            cursor: 0,
        }
    }

    /// Load persisted history; unreadable data yields an empty history
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self::load_with_capacity(store, HISTORY_CAPACITY)
    }

    pub fn load_with_capacity(store: &dyn KeyValueStore, capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity);
        let stored = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => serde_json::from_str::<Vec<String>>(&json).unwrap_or_else(|e| {
                tracing::debug!("Discarding malformed history: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::debug!("History unavailable: {e:#}");
                Vec::new()
            }
        };
        let skip = stored.len().saturating_sub(history.capacity);
        history.entries.extend(stored.into_iter().skip(skip));
        history.cursor = history.entries.len();
        history
    }

    /// Append a submitted line, drop the oldest beyond the bound, persist,
    /// and reset the cursor to one past the end.
    pub fn record(&mut self, line: &str, store: &mut dyn KeyValueStore) {
        self.entries.push_back(line.to_string());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len();
        self.persist(store);
    }

    fn persist(&self, store: &mut dyn KeyValueStore) {
        let result = serde_json::to_string(&self.entries)
            .map_err(anyhow::Error::from)
            .and_then(|json| store.set(HISTORY_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("History not persisted: {e:#}");
        }
    }

    /// Step back one entry. Returns `None` (leave the line unchanged) when
    /// there is nothing earlier to recall.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step forward one entry. Past the last entry the cursor resets to the
    /// end and the empty line is returned.
    pub fn recall_next(&mut self) -> &str {
        if !self.entries.is_empty() && self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            return &self.entries[self.cursor];
        }
        self.cursor = self.entries.len();
        ""
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

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
