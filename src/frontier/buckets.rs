use alloc::{collections::BTreeMap, sync::Arc, vec::Vec};
use core::cmp::Ordering;

use super::Frontier;
use crate::comparators::Comparator;

/// Map key ordered by the merge's comparator instead of `K: Ord`
#[derive(Debug, Clone)]
struct Ranked<K, C> {
    key: K,
    comparator: Arc<C>,
}

impl<K, C: Comparator<K>> PartialEq for Ranked<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl<K, C: Comparator<K>> Eq for Ranked<K, C> {}

impl<K, C: Comparator<K>> PartialOrd for Ranked<K, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, C: Comparator<K>> Ord for Ranked<K, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparator.compare(&self.key, &other.key)
    }
}

/// Ordered map from key to the bucket of entries currently holding that key.
///
/// Keys equal under the comparator share a bucket. Extraction takes the *last* entry of the
/// smallest bucket and drops the bucket once it's empty, so among equal keys the most recently
/// inserted comes out first.
#[derive(Debug, Clone)]
pub struct BucketFrontier<S, K, C> {
    buckets: BTreeMap<Ranked<K, C>, Vec<(S, K)>>,
    comparator: Arc<C>,
    len: usize,
}

impl<S, K, C> BucketFrontier<S, K, C> {
    /// Creates an empty map. Buckets are allocated on demand, so `capacity` is unused.
    pub fn with_capacity(comparator: C, _capacity: usize) -> Self {
        Self {
            buckets: BTreeMap::new(),
            comparator: Arc::new(comparator),
            len: 0,
        }
    }

    /// Number of distinct keys held
    pub fn buckets(&self) -> usize {
        self.buckets.len()
    }
}

impl<S, K, C> Frontier<S, K> for BucketFrontier<S, K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    fn insert(&mut self, cursor: S, key: K) {
        let ranked = Ranked {
            key: key.clone(),
            comparator: Arc::clone(&self.comparator),
        };
        self.buckets.entry(ranked).or_default().push((cursor, key));
        self.len += 1;
    }

    fn extract_min(&mut self) -> Option<(S, K)> {
        let mut bucket = self.buckets.first_entry()?;
        let item = bucket.get_mut().pop();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        if item.is_some() {
            self.len -= 1;
        }
        item
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}
