use std::collections::{HashSet, VecDeque};

use super::Number;

/// Bounded FIFO of unique numbers, oldest first
#[derive(Debug, Clone)]
pub struct Window {
    values: VecDeque<Number>,
    members: HashSet<Number>,
    capacity: usize,
}

impl Window {
    /// Capacity is clamped to at least one slot.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Append `value` unless already present, evicting the oldest entry when full.
    /// Returns whether the value was accepted.
    pub fn push_unique(&mut self, value: Number) -> bool {
        if self.members.contains(&value) {
            return false;
        }

        if self.values.len() >= self.capacity {
            if let Some(evicted) = self.values.pop_front() {
                self.members.remove(&evicted);
            }
        }

        self.values.push_back(value);
        self.members.insert(value);
        true
    }

    /// Contents in insertion order
    pub fn to_vec(&self) -> Vec<Number> {
        self.values.iter().copied().collect()
    }
}
