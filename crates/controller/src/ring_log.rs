//! Fixed-size diagnostic log. Used for routed intents and executor outcomes.

use std::collections::VecDeque;

use bevy::prelude::*;

/// Maximum number of entries retained by default.
pub const DEFAULT_LOG_CAPACITY: usize = 64;

/// Keeps the most recent entries, evicting the oldest once full.
#[derive(Resource, Debug, Clone)]
pub struct RingLog<T: Send + Sync + 'static> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: Send + Sync + 'static> Default for RingLog<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl<T: Send + Sync + 'static> RingLog<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.back()
    }

    /// The last `n` entries, oldest first (or fewer if the log is shorter).
    pub fn last_n(&self, n: usize) -> Vec<&T> {
        let start = self.entries.len().saturating_sub(n);
        self.entries.range(start..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
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
}
