use alloc::vec::Vec;

use super::Frontier;
use crate::comparators::Comparator;

/// Sorted list of `(cursor, key)` entries maintained by linear-scan insertion.
///
/// A new entry goes before the first entry whose key is `>=` its own, so among equal keys the
/// most recently inserted comes out first.
#[derive(Debug, Clone)]
pub struct LinearFrontier<S, K, C> {
    entries: Vec<(S, K)>,
    comparator: C,
}

impl<S, K, C> LinearFrontier<S, K, C> {
    /// Creates an empty list with room for `capacity` entries
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            comparator,
        }
    }
}

impl<S, K, C> Frontier<S, K> for LinearFrontier<S, K, C>
where
    C: Comparator<K>,
{
    fn insert(&mut self, cursor: S, key: K) {
        let Self {
            entries,
            comparator,
        } = self;
        match entries
            .iter()
            .position(|e| comparator.compare(&key, &e.1).is_le())
        {
            Some(idx) => entries.insert(idx, (cursor, key)),
            None => entries.push((cursor, key)),
        }
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

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{comparators::ByOrd, frontier::tests::drain};

    #[test]
    fn scan_insertion() {
        let mut list = LinearFrontier::with_capacity(ByOrd, 0);
        list.seed([(0, 4), (1, 2), (2, 4), (3, 8)]);
        assert_eq!(list.entries, [(1, 2), (2, 4), (0, 4), (3, 8)]);
        list.insert(4, 9);
        list.insert(5, 0);
        assert_eq!(drain(&mut list), [(5, 0), (1, 2), (2, 4), (0, 4), (3, 8), (4, 9)]);
    }
}
