//! The cultivation journal: a capped, append-only record of progression
//! events for display. Observational only, never authoritative state.

use crate::constants::JOURNAL_CAPACITY;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LogKind {
    Cultivate,
    BreakthroughSuccess,
    BreakthroughFailure,
    Insight,
    StageChange,
}

impl LogKind {
    pub fn all() -> [LogKind; 5] {
        [
            LogKind::Cultivate,
            LogKind::BreakthroughSuccess,
            LogKind::BreakthroughFailure,
            LogKind::Insight,
            LogKind::StageChange,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogKind::Cultivate => "cultivate",
            LogKind::BreakthroughSuccess => "breakthrough success",
            LogKind::BreakthroughFailure => "breakthrough failure",
            LogKind::Insight => "insight",
            LogKind::StageChange => "stage change",
        }
    }
}

/// Structured numbers behind a log message, for richer display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogDetails {
    pub cultivation_gained: Option<u64>,
    pub cultivation_lost: Option<u64>,
    pub soul_strength_lost: Option<u32>,
    pub vitality_lost: Option<u32>,
    /// (from, to) stage names.
    pub stage_change: Option<(String, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    /// Unix timestamp.
    pub timestamp: i64,
    pub character_id: Uuid,
    pub kind: LogKind,
    pub message: String,
    #[serde(default)]
    pub details: LogDetails,
}

/// Newest-first ring of log entries, truncated at `capacity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(JOURNAL_CAPACITY)
    }
}

impl Journal {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Appends an entry stamped with the current time.
    pub fn record(
        &mut self,
        character_id: Uuid,
        kind: LogKind,
        message: impl Into<String>,
        details: LogDetails,
    ) {
        self.entries.push_front(LogEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now().timestamp(),
            character_id,
            kind,
            message: message.into(),
            details,
        });
        self.entries.truncate(self.capacity);
    }

    /// All entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn recent(&self, count: usize) -> Vec<&LogEntry> {
        self.entries.iter().take(count).collect()
    }

    pub fn of_kind(&self, kind: LogKind) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// Entries whose timestamp falls in `start..=end`.
    pub fn between(&self, start: i64, end: i64) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect()
    }

    /// Case-insensitive message search.
    pub fn search(&self, keyword: &str) -> Vec<&LogEntry> {
        let keyword = keyword.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.message.to_lowercase().contains(&keyword))
            .collect()
    }

    pub fn counts_by_kind(&self) -> HashMap<LogKind, usize> {
        let mut counts = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
