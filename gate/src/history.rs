//! Bounded, newest-first activity history.

use crate::types::ActivityRecord;

/// Ordered log of past decisions. Insertion is always at the front;
/// anything past the cap falls off the back.
#[derive(Debug)]
pub struct ActivityLog {
    records: Vec<ActivityRecord>,
    cap: usize,
}

impl ActivityLog {
    /// Create an empty log with the given capacity.
    pub fn new(cap: usize) -> Self {
        Self {
            records: Vec::new(),
            cap,
        }
    }

    /// Rebuild from persisted records, truncating oversized data.
    pub fn restore(mut records: Vec<ActivityRecord>, cap: usize) -> Self {
        records.truncate(cap);
        Self { records, cap }
    }

    /// Prepend a record, evicting the oldest past the cap.
    pub fn append(&mut self, record: ActivityRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.cap);
    }

    /// Records, most recent first.
    pub fn list(&self) -> &[ActivityRecord] {
        &self.records
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
