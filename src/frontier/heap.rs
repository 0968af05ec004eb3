use alloc::vec::Vec;
use core::mem;

use super::Frontier;
use crate::{comparators::Comparator, internal::Hole};

/// Binary min-heap of `(cursor, key)` entries ordered by `C`.
///
/// Heap structure:
/// 0 - min element
/// [idx*2+1, idx*2+2] - children of the idx element
///
/// Equal keys come out in whatever order the heap happens to hold them; that order is
/// repeatable for the same sequence of operations.
#[derive(Debug, Clone)]
pub struct HeapFrontier<S, K, C> {
    entries: Vec<(S, K)>,
    comparator: C,
}

impl<S, K, C> HeapFrontier<S, K, C> {
    /// Creates an empty heap with room for `capacity` entries
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            comparator,
        }
    }
}

impl<S, K, C> HeapFrontier<S, K, C>
where
    C: Comparator<K>,
{
    /// Take the element at `pos` and move it up the heap while it's smaller than its parent.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `pos < self.entries.len()`.
    unsafe fn sift_up(&mut self, pos: usize) {
        let Self {
            entries,
            comparator,
        } = self;
        // SAFETY: the caller guarantees that pos < entries.len()
        let mut hole = unsafe { Hole::new(entries, pos) };

        while hole.pos() > 0 {
            let parent = (hole.pos() - 1) / 2;
            // SAFETY: parent < hole.pos(), so it's a valid index distinct from the hole
            if comparator
                .compare(&hole.element().1, unsafe { &hole.get(parent).1 })
                .is_ge()
            {
                break;
            }
            // SAFETY: same as above
            unsafe { hole.move_to(parent) };
        }
    }

    /// Take the element at `pos` and move it down the heap while its children are smaller.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `pos < self.entries.len()`.
    unsafe fn sift_down(&mut self, pos: usize) {
        let Self {
            entries,
            comparator,
        } = self;
        let end = entries.len();
        // SAFETY: the caller guarantees that pos < end
        let mut hole = unsafe { Hole::new(entries, pos) };
        let mut child = 2 * hole.pos() + 1;

        // Loop invariant: child == 2 * hole.pos() + 1.
        while child + 1 < end {
            // SAFETY: child + 1 < end and both children are != hole.pos()
            unsafe {
                // find the smaller of the two children
                if comparator
                    .compare(&hole.get(child + 1).1, &hole.get(child).1)
                    .is_lt()
                {
                    child += 1;
                }
                // if we are already in order, stop.
                if comparator
                    .compare(&hole.element().1, &hole.get(child).1)
                    .is_le()
                {
                    return;
                }
                hole.move_to(child);
            }
            child = 2 * hole.pos() + 1;
        }

        // SAFETY: child == end - 1 is in bounds and != hole.pos()
        if child == end - 1
            && comparator
                .compare(&hole.element().1, unsafe { &hole.get(child).1 })
                .is_gt()
        {
            // SAFETY: same as above
            unsafe { hole.move_to(child) };
        }
    }
}

impl<S, K, C> Frontier<S, K> for HeapFrontier<S, K, C>
where
    C: Comparator<K>,
{
    fn insert(&mut self, cursor: S, key: K) {
        self.entries.push((cursor, key));
        let last = self.entries.len() - 1;
        // SAFETY: last is the index of the entry just pushed
        unsafe { self.sift_up(last) };
    }

    fn extract_min(&mut self) -> Option<(S, K)> {
        let mut item = self.entries.pop()?;
        if let Some(root) = self.entries.first_mut() {
            mem::swap(&mut item, root);
            // SAFETY: the heap is not empty
            unsafe { self.sift_down(0) };
        }
        Some(item)
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Bottom-up heapify of all seeded entries
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
        self.entries.extend(entries);
        for n in (0..self.entries.len() / 2).rev() {
            // SAFETY: n < len / 2 < len
            unsafe { self.sift_down(n) };
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::{
        comparators::{ByFunc, ByOrd},
        frontier::tests::drain,
    };

    #[test]
    fn heap_order() {
        let mut heap = HeapFrontier::with_capacity(ByOrd, 0);
        heap.seed((0..10).map(|n| (n, (n * 7) % 10)));
        for n in 10..20 {
            heap.insert(n, (n * 3) % 10);
        }
        let keys: Vec<_> = drain(&mut heap).into_iter().map(|(_, k)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 20);
    }

    #[test]
    fn seed_into_non_empty() {
        let mut heap = HeapFrontier::with_capacity(ByOrd, 0);
        heap.insert(0, 4);
        heap.seed([(1, 2), (2, 6)]);
        assert_eq!(heap.extract_min(), Some((1, 2)));
        assert_eq!(heap.extract_min(), Some((0, 4)));
        assert_eq!(heap.extract_min(), Some((2, 6)));
    }

    #[test]
    fn custom_comparator() {
        let by_len = ByFunc(|a: &&str, b: &&str| a.len().cmp(&b.len()));
        let mut heap = HeapFrontier::with_capacity(by_len, 3);
        heap.seed([(0, "ccc"), (1, "a"), (2, "bb")]);
        assert_eq!(heap.extract_min(), Some((1, "a")));
        assert_eq!(heap.extract_min(), Some((2, "bb")));
        assert_eq!(heap.extract_min(), Some((0, "ccc")));
        assert_eq!(heap.extract_min(), None);
    }
}
