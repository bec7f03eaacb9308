//! Bounded cache of already-processed transfer hashes.
//!
//! Purely an optimization: it keeps the reconciler from re-submitting
//! every visible transfer on every poll. Correctness (at-most-once credit)
//! comes from the ledger's unique external-id index, so evicting a hash
//! here costs one redundant, rejected store call at worst.

use std::collections::{HashSet, VecDeque};

/// Insertion-ordered set of transfer hashes with batch trimming.
///
/// When the set grows past `max`, the oldest entries are dropped until
/// `retain` remain. Trimming in a batch (rather than one-at-a-time LRU)
/// keeps steady-state work amortized across many inserts.
#[derive(Debug)]
pub struct SeenCache {
    seen: HashSet<String>,
    /// Insertion order, front = oldest.
    order: VecDeque<String>,
    max: usize,
    retain: usize,
}

impl SeenCache {
    /// # Panics
    /// Panics if `retain >= max` or `max` is zero.
    #[must_use]
    pub fn new(max: usize, retain: usize) -> Self {
        assert!(max > 0, "SeenCache max must be > 0");
        assert!(retain < max, "SeenCache retain must be < max");
        Self {
            seen: HashSet::with_capacity(max),
            order: VecDeque::with_capacity(max),
            max,
            retain,
        }
    }

    /// Record a hash. Returns `true` if it was new, `false` if already seen.
    pub fn insert(&mut self, hash: &str) -> bool {
        if !self.seen.insert(hash.to_string()) {
            return false;
        }
        self.order.push_back(hash.to_string());
        if self.order.len() > self.max {
            while self.order.len() > self.retain {
                if let Some(oldest) = self.order.pop_front() {
                    self.seen.remove(&oldest);
                }
            }
        }
        true
    }

    #[must_use]
    pub fn contains(&self, hash: &str) -> bool {
        self.seen.contains(hash)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_novelty() {
        let mut cache = SeenCache::new(10, 5);
        assert!(cache.insert("a"));
        assert!(!cache.insert("a"));
        assert!(cache.contains("a"));
    }

    #[test]
    fn trims_to_retain_when_over_max() {
        let mut cache = SeenCache::new(4, 2);
        for hash in ["a", "b", "c", "d"] {
            cache.insert(hash);
        }
        assert_eq!(cache.len(), 4);

        // The fifth insert breaches max and trims down to retain.
        cache.insert("e");
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("d"));
        assert!(cache.contains("e"));
        assert!(!cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(!cache.contains("c"));
    }

    #[test]
    fn evicted_hash_counts_as_new_again() {
        let mut cache = SeenCache::new(2, 1);
        cache.insert("a");
        cache.insert("b");
        cache.insert("c"); // evicts down to {c}
        assert!(cache.insert("a"));
    }

    #[test]
    #[should_panic(expected = "retain must be < max")]
    fn rejects_retain_at_max() {
        let _ = SeenCache::new(5, 5);
    }
}
