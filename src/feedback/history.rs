// Bounded command history - most-recent-first, persisted as JSON

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One successfully matched command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// What the user said
    pub utterance: String,
    /// The confirmation that was spoken/displayed
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded, most-recent-first sequence of matched commands.
/// Insertion beyond capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a history from persisted JSON, keeping at most `capacity`
    /// of the most recent entries. Malformed JSON yields an empty history.
    pub fn from_json(json: &str, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        match serde_json::from_str::<Vec<HistoryEntry>>(json) {
            Ok(entries) => {
                history.entries = entries.into_iter().take(capacity).collect();
            }
            Err(e) => {
                crate::warn!("discarding malformed command history: {}", e);
            }
        }
        history
    }

    /// JSON encoding of the entries, most-recent-first
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<&HistoryEntry> = self.entries.iter().collect();
        serde_json::to_string(&entries)
    }

    /// Record a new entry at the front, evicting beyond capacity
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries, most recent first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
