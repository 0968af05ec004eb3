//! Priority queue whose entries can be re-prioritised or removed after they were enqueued.
//!
//! [`UpdatablePriorityQueue`] is a 4-ary min-heap. Every [`enqueue`](UpdatablePriorityQueue::enqueue)
//! returns a [`Handle`] that keeps referring to the same entry while it moves around the heap, and
//! goes stale once the entry leaves the queue.
//!
//! The merge's [`UpdatableQueue`](crate::UpdatableQueue) strategy only enqueues and dequeues.
//!
//! ```
//! use sorted_merge::UpdatablePriorityQueue;
//!
//! let mut queue = UpdatablePriorityQueue::new();
//! let a = queue.enqueue("a", 5);
//! queue.enqueue("b", 3);
//! assert_eq!(queue.update_priority(a, 1), Some(5));
//! assert_eq!(queue.dequeue(), Some(("a", 1)));
//! assert_eq!(queue.dequeue(), Some(("b", 3)));
//! assert!(!queue.contains(a));
//! ```

use alloc::vec::Vec;
use core::{cmp::Ordering, mem};

use crate::comparators::{ByOrd, Comparator};

const LOG2_ARITY: usize = 2;
const ARITY: usize = 1 << LOG2_ARITY;
const VACANT: usize = usize::MAX;

/// Reference to an entry of an [`UpdatablePriorityQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node<E, P> {
    element: E,
    priority: P,
    slot: usize,
}

/// Heap index of the entry a handle slot refers to
#[derive(Debug, Clone)]
struct Slot {
    pos: usize,
    generation: u32,
}

/// 4-ary min-heap of `(element, priority)` entries with handle-based updates.
#[derive(Debug, Clone)]
pub struct UpdatablePriorityQueue<E, P, C = ByOrd> {
    nodes: Vec<Node<E, P>>,
    slots: Vec<Slot>,
    vacant: Vec<usize>,
    comparator: C,
}

impl<E, P> UpdatablePriorityQueue<E, P> {
    /// Creates an empty queue ordered by [`Ord`]
    pub fn new() -> Self {
        Self::with_comparator(ByOrd)
    }
}

impl<E, P> Default for UpdatablePriorityQueue<E, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P, C> UpdatablePriorityQueue<E, P, C> {
    /// Creates an empty queue ordered by `comparator`
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity(comparator, 0)
    }

    /// Creates an empty queue ordered by `comparator` with room for `capacity` entries
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            comparator,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entry with the smallest priority
    pub fn peek(&self) -> Option<(&E, &P)> {
        self.nodes.first().map(|n| (&n.element, &n.priority))
    }

    /// Returns true if `handle` still refers to an entry of this queue
    pub fn contains(&self, handle: Handle) -> bool {
        self.position(handle).is_some()
    }

    /// Priority of the entry referred to by `handle`
    pub fn priority(&self, handle: Handle) -> Option<&P> {
        let pos = self.position(handle)?;
        Some(&self.nodes[pos].priority)
    }

    /// Element of the entry referred to by `handle`
    pub fn element(&self, handle: Handle) -> Option<&E> {
        let pos = self.position(handle)?;
        Some(&self.nodes[pos].element)
    }

    /// Removes every entry. All outstanding handles go stale.
    pub fn clear(&mut self) {
        for node in mem::take(&mut self.nodes) {
            self.free(node.slot);
        }
    }

    fn position(&self, handle: Handle) -> Option<usize> {
        let slot = self.slots.get(handle.slot)?;
        (slot.generation == handle.generation && slot.pos != VACANT).then_some(slot.pos)
    }

    fn alloc(&mut self, pos: usize) -> Handle {
        if let Some(slot) = self.vacant.pop() {
            self.slots[slot].pos = pos;
            Handle {
                slot,
                generation: self.slots[slot].generation,
            }
        } else {
            self.slots.push(Slot { pos, generation: 0 });
            Handle {
                slot: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    fn free(&mut self, slot: usize) {
        let slot_ref = &mut self.slots[slot];
        slot_ref.pos = VACANT;
        slot_ref.generation = slot_ref.generation.wrapping_add(1);
        self.vacant.push(slot);
    }

    /// Points the slot of the node at `pos` back at it
    #[inline]
    fn track(&mut self, pos: usize) {
        let slot = self.nodes[pos].slot;
        self.slots[slot].pos = pos;
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.track(a);
        self.track(b);
    }
}

impl<E, P, C> UpdatablePriorityQueue<E, P, C>
where
    C: Comparator<P>,
{
    /// Adds an entry and returns its handle.
    pub fn enqueue(&mut self, element: E, priority: P) -> Handle {
        let pos = self.nodes.len();
        let handle = self.alloc(pos);
        self.nodes.push(Node {
            element,
            priority,
            slot: handle.slot,
        });
        self.sift_up(pos);
        handle
    }

    /// Removes the entry with the smallest priority.
    pub fn dequeue(&mut self) -> Option<(E, P)> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Replaces the priority of the entry referred to by `handle`, returning the old one.
    ///
    /// Returns `None` and leaves the queue untouched if the handle is stale.
    pub fn update_priority(&mut self, handle: Handle, priority: P) -> Option<P> {
        let pos = self.position(handle)?;
        let old = mem::replace(&mut self.nodes[pos].priority, priority);
        match self.comparator.compare(&self.nodes[pos].priority, &old) {
            Ordering::Less => {
                self.sift_up(pos);
            }
            Ordering::Greater => self.sift_down(pos),
            Ordering::Equal => {}
        }
        Some(old)
    }

    /// Lowers the priority of the entry referred to by `handle` if `priority` is smaller than
    /// the current one. Returns true if the priority changed.
    pub fn update_minimum(&mut self, handle: Handle, priority: P) -> bool {
        let Some(pos) = self.position(handle) else {
            return false;
        };
        if self
            .comparator
            .compare(&priority, &self.nodes[pos].priority)
            .is_lt()
        {
            self.nodes[pos].priority = priority;
            self.sift_up(pos);
            true
        } else {
            false
        }
    }

    /// Removes the entry referred to by `handle`.
    pub fn remove(&mut self, handle: Handle) -> Option<(E, P)> {
        let pos = self.position(handle)?;
        Some(self.remove_at(pos))
    }

    fn remove_at(&mut self, pos: usize) -> (E, P) {
        let last = self.nodes.len() - 1;
        if pos != last {
            self.swap(pos, last);
        }
        let node = self.nodes.swap_remove(last);
        self.free(node.slot);
        if pos < self.nodes.len() && self.sift_up(pos) == pos {
            self.sift_down(pos);
        }
        (node.element, node.priority)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.comparator
            .compare(&self.nodes[a].priority, &self.nodes[b].priority)
            .is_lt()
    }

    /// Moves the node at `pos` towards the root, returns its final position.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) >> LOG2_ARITY;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.nodes.len();
        loop {
            let first = (pos << LOG2_ARITY) + 1;
            if first >= len {
                return;
            }
            let end = len.min(first + ARITY);
            let mut min = first;
            for child in first + 1..end {
                if self.less(child, min) {
                    min = child;
                }
            }
            if !self.less(min, pos) {
                return;
            }
            self.swap(pos, min);
            pos = min;
        }
    }
}
