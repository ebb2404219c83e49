//! # Calculation History
//!
//! Bounded in-memory log of finalized calculations, most recent first.
//! When full, recording a new entry evicts the oldest one.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One finalized calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    /// Full equation text, e.g. `"5 + 3 = 8"`
    pub equation: String,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(equation: impl Into<String>, result: f64) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            equation: equation.into(),
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Fixed-capacity history log.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryLog {
    capacity: usize,
    /// Front is the most recent entry
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn with_capacity(capacity: usize) -> Self {
        HistoryLog {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Record an entry, evicting the oldest if the log is full.
    ///
    /// Does nothing when the capacity is zero.
    pub fn record(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    /// Entries, most recent first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
