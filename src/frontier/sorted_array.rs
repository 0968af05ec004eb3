use alloc::vec::Vec;

use super::Frontier;
use crate::comparators::Comparator;

/// Sorted array of `(cursor, key)` entries, smallest key at index 0.
///
/// Insertion binary-searches for the position and shifts the tail right; extraction takes
/// index 0. When the search probes an entry with an equal key, the new entry is written at
/// that entry's position, so it comes out before it.
#[derive(Debug, Clone)]
pub struct SortedArrayFrontier<S, K, C> {
    entries: Vec<(S, K)>,
    comparator: C,
}

impl<S, K, C> SortedArrayFrontier<S, K, C> {
    /// Creates an empty array with room for `capacity` entries
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            comparator,
        }
    }
}

impl<S, K, C> Frontier<S, K> for SortedArrayFrontier<S, K, C>
where
    C: Comparator<K>,
{
    fn insert(&mut self, cursor: S, key: K) {
        let Self {
            entries,
            comparator,
        } = self;
        let (Ok(idx) | Err(idx)) =
            entries.binary_search_by(|probe| comparator.compare(&probe.1, &key));
        entries.insert(idx, (cursor, key));
    }

    fn extract_min(&mut self) -> Option<(S, K)> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries.remove(0))
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sorts the seeded entries once; equal keys keep their source order
    fn seed<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, K)>,
    {
        if !self.entries.is_empty() {
            for (cursor, key) in entries {
                self.insert(cursor, key);
            }
            return;
        }
        let mut seeded: Vec<_> = entries.into_iter().collect();
        let comparator = &self.comparator;
        seeded.sort_by(|a, b| comparator.compare(&a.1, &b.1));
        self.entries.extend(seeded);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
