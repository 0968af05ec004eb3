//! Frontier structures: the working set of "next candidate per active source".
//!
//! A [`Frontier`] holds one `(cursor, key)` entry per source that still has data and answers
//! which one holds the smallest key. The merge drivers use the source's slot index as the
//! cursor, so entries are small regardless of the element type.
//!
//! Six interchangeable strategies are provided. They yield the same multiset of elements and the
//! same order among distinct keys, but each breaks ties between equal keys its own way:
//!
//! | Strategy | Frontier | Insert | Extract | Equal keys |
//! |---|---|---|---|---|
//! | [`BinaryHeap`] | [`HeapFrontier`] | O(log n) | O(log n) | heap order |
//! | [`SortedArray`] | [`SortedArrayFrontier`] | O(log n) search + O(n) shift | O(n) shift | the new entry lands at the probed position |
//! | [`BinarySearchList`] | [`LinkedFrontier`] | O(log n) probes, O(n) hops | O(1) | inserted before a probed equal node |
//! | [`LinearList`] | [`LinearFrontier`] | O(n) | O(n) shift | most recently inserted first |
//! | [`Buckets`] | [`BucketFrontier`] | O(log n) | O(log n) | most recently inserted first (LIFO bucket) |
//! | [`UpdatableQueue`] | [`QueueFrontier`] | O(log n) | O(log n) | 4-ary heap order |
//!
//! Every strategy is deterministic: the same input always yields the same output order.

use crate::comparators::Comparator;

mod buckets;
mod heap;
mod linear;
mod linked_list;
mod queue;
mod sorted_array;

pub use buckets::BucketFrontier;
pub use heap::HeapFrontier;
pub use linear::LinearFrontier;
pub use linked_list::LinkedFrontier;
pub use queue::QueueFrontier;
pub use sorted_array::SortedArrayFrontier;

/// Ordered working set of `(cursor, key)` entries.
///
/// Implementations must accept duplicate keys from different cursors.
pub trait Frontier<S, K> {
    /// Adds an entry.
    fn insert(&mut self, cursor: S, key: K);

    /// Removes the entry with the smallest key, `None` iff the frontier is empty.
    fn extract_min(&mut self) -> Option<(S, K)>;

    /// Number of entries held
    fn len(&self) -> usize;

    /// Returns true if [`len`](Frontier::len) == 0
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loads the initial entries, one per source that produced a first element.
    ///
    /// Entries are given in source order. Strategies that can build their layout in one pass
    /// override this.
    fn seed<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, K)>,
    {
        for (cursor, key) in entries {
            self.insert(cursor, key);
        }
    }

    /// Drops every entry.
    fn clear(&mut self);
}

/// Constructs frontiers of one kind.
///
/// Strategies are zero-sized markers passed to [`Builder::strategy`](crate::Builder::strategy).
pub trait Strategy {
    /// Frontier built by this strategy
    type Frontier<S, K, C>: Frontier<S, K>
    where
        K: Clone,
        C: Comparator<K>;

    /// Creates an empty frontier ordered by `comparator`, with room for `capacity` entries.
    fn frontier<S, K, C>(&self, comparator: C, capacity: usize) -> Self::Frontier<S, K, C>
    where
        K: Clone,
        C: Comparator<K>;
}

/// Frontier built by strategy `St` for slot-indexed entries
pub type FrontierOf<St, K, C> = <St as Strategy>::Frontier<usize, K, C>;

macro_rules! strategy {
    ($(#[$meta:meta])* $name:ident => $frontier:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Strategy for $name {
            type Frontier<S, K, C> = $frontier<S, K, C>
            where
                K: Clone,
                C: Comparator<K>;

            #[inline]
            fn frontier<S, K, C>(&self, comparator: C, capacity: usize) -> $frontier<S, K, C>
            where
                K: Clone,
                C: Comparator<K>,
            {
                $frontier::with_capacity(comparator, capacity)
            }
        }
    };
}

strategy! {
    /// Binary min-heap, see [`HeapFrontier`]. The default strategy.
    BinaryHeap => HeapFrontier
}
strategy! {
    /// Sorted vector with binary-search insertion, see [`SortedArrayFrontier`]
    SortedArray => SortedArrayFrontier
}
strategy! {
    /// Doubly linked list with binary-search insertion, see [`LinkedFrontier`]
    BinarySearchList => LinkedFrontier
}
strategy! {
    /// Sorted vector with linear-scan insertion, see [`LinearFrontier`]
    LinearList => LinearFrontier
}
strategy! {
    /// Ordered map of key buckets, see [`BucketFrontier`]
    Buckets => BucketFrontier
}
strategy! {
    /// Updatable priority queue used as a plain queue, see [`QueueFrontier`]
    UpdatableQueue => QueueFrontier
}
