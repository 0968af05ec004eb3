use super::Frontier;
use crate::{comparators::Comparator, updatable_queue::UpdatablePriorityQueue};

/// [`UpdatablePriorityQueue`] used as a plain priority queue.
///
/// Entries are enqueued and dequeued only; a source whose head was emitted is re-enqueued with
/// its next key rather than updated in place. Equal keys follow 4-ary heap order.
#[derive(Debug, Clone)]
pub struct QueueFrontier<S, K, C> {
    queue: UpdatablePriorityQueue<S, K, C>,
}

impl<S, K, C> QueueFrontier<S, K, C> {
    /// Creates an empty queue with room for `capacity` entries
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        Self {
            queue: UpdatablePriorityQueue::with_capacity(comparator, capacity),
        }
    }
}

impl<S, K, C> Frontier<S, K> for QueueFrontier<S, K, C>
where
    C: Comparator<K>,
{
    #[inline]
    fn insert(&mut self, cursor: S, key: K) {
        self.queue.enqueue(cursor, key);
    }

    #[inline]
    fn extract_min(&mut self) -> Option<(S, K)> {
        self.queue.dequeue()
    }

    #[inline]
    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}
