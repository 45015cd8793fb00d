//! Bounded recency memory of visited solutions.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// FIFO of the last `capacity` accepted solutions with O(1) membership.
///
/// Pushing onto a full list evicts the oldest entry. A list with
/// capacity 0 never holds anything.
#[derive(Debug, Clone)]
pub struct TabuList<S: Eq + Hash + Clone> {
    capacity: usize,
    queue: VecDeque<S>,
    counts: HashMap<S, usize>,
}

impl<S: Eq + Hash + Clone> TabuList<S> {
    /// Empty list holding at most `capacity` solutions.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            counts: HashMap::with_capacity(capacity),
        }
    }

    /// Records `solution` as the most recent visit.
    pub fn push(&mut self, solution: S) {
        if self.capacity == 0 {
            return;
        }
        if self.queue.len() >= self.capacity {
            if let Some(oldest) = self.queue.pop_front() {
                self.forget(&oldest);
            }
        }
        *self.counts.entry(solution.clone()).or_insert(0) += 1;
        self.queue.push_back(solution);
    }

    /// Whether `solution` is among the remembered visits.
    pub fn contains(&self, solution: &S) -> bool {
        self.counts.contains_key(solution)
    }

    /// Number of remembered visits.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Maximum number of remembered visits.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn forget(&mut self, solution: &S) {
        if let Entry::Occupied(mut e) = self.counts.entry(solution.clone()) {
            *e.get_mut() -= 1;
            if *e.get() == 0 {
                e.remove();
            }
        }
    }
}
