//! Ownership of every cursor taking part in a merge.
//!
//! [`Cursors`] is acquired once, when the merge is built, with one slot per source. A slot holds
//! the cursor and its *head*: the element already pulled but not yet emitted. Frontiers only
//! refer to slots by index.
//!
//! Release is dropping the cursor. Each slot's cursor is released exactly once:
//! * by [`Cursors::release`] when the cursor reports end-of-data,
//! * by [`Cursors::release_all`] when the merge finishes, faults or is cancelled,
//! * by `Drop` when the consumer abandons the merge (including unwinding from a panic).
//!
//! [`Cursors::release_all`] drops the whole slot vector at once, so if one cursor panics
//! while being dropped the remaining ones are still dropped before the panic propagates.

use alloc::vec::Vec;
use core::mem;

use tracing::trace;

#[derive(Debug, Clone)]
struct Slot<S, T> {
    cursor: Option<S>,
    head: Option<T>,
}

/// Slot table of cursors and their pulled-but-not-emitted heads
#[derive(Debug, Clone)]
pub(crate) struct Cursors<S, T> {
    slots: Vec<Slot<S, T>>,
    open: usize,
}

impl<S, T> Cursors<S, T> {
    pub(crate) fn new(cursors: impl IntoIterator<Item = S>) -> Self {
        let slots: Vec<_> = cursors
            .into_iter()
            .map(|cursor| Slot {
                cursor: Some(cursor),
                head: None,
            })
            .collect();
        Self {
            open: slots.len(),
            slots,
        }
    }

    /// Number of slots acquired at construction (open or released)
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Number of cursors not released yet
    #[inline]
    pub(crate) fn open(&self) -> usize {
        self.open
    }

    /// Cursor of slot `idx`, `None` once it's released
    #[inline]
    pub(crate) fn cursor_mut(&mut self, idx: usize) -> Option<&mut S> {
        self.slots.get_mut(idx)?.cursor.as_mut()
    }

    #[inline]
    pub(crate) fn set_head(&mut self, idx: usize, item: T) {
        if let Some(slot) = self.slots.get_mut(idx) {
            debug_assert!(slot.head.is_none(), "slot {idx} already holds a head");
            slot.head = Some(item);
        }
    }

    #[inline]
    pub(crate) fn take_head(&mut self, idx: usize) -> Option<T> {
        self.slots.get_mut(idx)?.head.take()
    }

    /// Releases the cursor of slot `idx`. Releasing a slot twice is a no-op.
    pub(crate) fn release(&mut self, idx: usize) {
        let Some(slot) = self.slots.get_mut(idx) else {
            return;
        };
        let cursor = slot.cursor.take();
        let head = slot.head.take();
        if cursor.is_some() {
            self.open -= 1;
            trace!(source = idx, "cursor released");
        }
        drop(head);
        drop(cursor);
    }

    /// Releases every cursor still open. Repeated calls are no-ops.
    pub(crate) fn release_all(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        trace!(open = self.open, "releasing all cursors");
        self.open = 0;
        drop(mem::take(&mut self.slots));
    }

    /// Calls `func` with every open cursor and whether its slot holds a head
    pub(crate) fn for_each_open(&self, mut func: impl FnMut(&S, bool)) {
        for slot in &self.slots {
            if let Some(cursor) = &slot.cursor {
                func(cursor, slot.head.is_some());
            }
        }
    }
}

impl<S, T> Drop for Cursors<S, T> {
    fn drop(&mut self) {
        self.release_all();
    }
}
