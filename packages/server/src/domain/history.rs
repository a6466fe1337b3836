//! Bounded history of recorded broadcasts.

use std::collections::VecDeque;

use super::event::ChatEvent;

/// Maximum number of events replayed to a joining user
pub const MAX_HISTORY: usize = 100;

/// Fixed-capacity, insertion-ordered event buffer.
///
/// Pushing onto a full buffer evicts the oldest entry, so the buffer always
/// holds the most recent `capacity` events in broadcast order.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<ChatEvent>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event, returning the evicted one if the buffer was full
    pub fn push(&mut self, event: ChatEvent) -> Option<ChatEvent> {
        self.entries.push_back(event);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
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

    pub fn iter(&self) -> impl Iterator<Item = &ChatEvent> {
        self.entries.iter()
    }

    /// Copy of the entries, oldest first
    pub fn snapshot(&self) -> Vec<ChatEvent> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
