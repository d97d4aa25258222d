//! Bounded in-memory history of question/answer exchanges.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Upper bound on retained interaction records.
pub const HISTORY_CAP: usize = 100;

/// One logged question/answer exchange.
#[derive(Debug, Clone)]
pub struct InteractionRecord {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
    pub had_attached_file: bool,
}

/// Process-wide FIFO of interaction records, capped at [`HISTORY_CAP`].
///
/// Append-and-evict is not atomic, so the deque lives behind a mutex.
#[derive(Debug, Default)]
pub struct InteractionHistory {
    records: Mutex<VecDeque<InteractionRecord>>,
}

impl InteractionHistory {
    /// Appends a finalized exchange, evicting the oldest record past the cap.
    pub fn append(&self, question: &str, answer: &str, had_attached_file: bool) {
        let record = InteractionRecord {
            question: question.to_string(),
            answer: answer.to_string(),
            timestamp: Utc::now(),
            had_attached_file,
        };
        let mut records = self.lock();
        records.push_back(record);
        while records.len() > HISTORY_CAP {
            records.pop_front();
        }
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Up to `limit` most recent records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<InteractionRecord> {
        self.lock().iter().rev().take(limit).cloned().collect()
    }

    /// Top `limit` questions by exact string equality, most frequent first.
    ///
    /// Ties break alphabetically so the dashboard ordering is stable.
    pub fn most_frequent(&self, limit: usize) -> Vec<(String, usize)> {
        let records = self.lock();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records.iter() {
            *counts.entry(record.question.as_str()).or_default() += 1;
        }
        let mut out: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(question, count)| (question.to_string(), count))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out.truncate(limit);
        out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<InteractionRecord>> {
        // A poisoned lock still holds consistent data for this type.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}
