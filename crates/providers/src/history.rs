//! Rolling conversation history used to give the model short-term context.

use shared::message::Sender;
use std::collections::VecDeque;

/// Entries kept in the rolling history
pub const MAX_HISTORY: usize = 10;
/// Entries rendered into the prompt (three exchanges)
pub const CONTEXT_ENTRIES: usize = 6;
/// Per-entry character cap
pub const MAX_ENTRY_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct ConversationHistory {
    entries: VecDeque<HistoryEntry>,
    generation: u64,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sender: Sender, text: &str) {
        self.entries.push_back(HistoryEntry {
            sender,
            text: text.chars().take(MAX_ENTRY_CHARS).collect(),
        });
        while self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
        }
    }

    /// `sender: text` lines for the most recent entries; empty when there is
    /// no history.
    pub fn context(&self) -> String {
        let start = self.entries.len().saturating_sub(CONTEXT_ENTRIES);
        self.entries
            .iter()
            .skip(start)
            .map(|e| format!("{}: {}", e.sender, e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped by every [`clear`](Self::clear)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }
}
