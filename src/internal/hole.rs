use core::{mem::ManuallyDrop, ptr};

/// Hole represents a hole in a slice i.e., an index without valid value
/// (because it was moved from or duplicated).
/// In drop, `Hole` will restore the slice by filling the hole
/// position with the value that was originally removed.
pub(crate) struct Hole<'a, T> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// Creates a new `Hole` at index `pos`.
    ///
    /// # Safety
    ///
    /// Caller must ensure that `pos < data.len()`.
    #[inline]
    pub(crate) unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFETY: pos is inside the slice; the value is written back in `drop`
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Self {
            data,
            elt: ManuallyDrop::new(elt),
            pos,
        }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Returns a reference to the element removed.
    #[inline]
    pub(crate) fn element(&self) -> &T {
        &self.elt
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Safety
    ///
    /// Index must be within the data slice and not equal to pos.
    #[inline]
    pub(crate) unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos, "Read of element in a hole");
        debug_assert!(index < self.data.len());
        // SAFETY: caller guarantees the index is in bounds
        unsafe { self.data.get_unchecked(index) }
    }

    /// Move hole to new location
    ///
    /// # Safety
    ///
    /// Index must be within the data slice and not equal to pos.
    #[inline]
    pub(crate) unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos, "Moved Hole to the same position");
        debug_assert!(index < self.data.len());
        // SAFETY: both indices are in bounds and distinct, so the copy doesn't overlap
        unsafe {
            let ptr = self.data.as_mut_ptr();
            let index_ptr: *const T = ptr.add(index);
            let hole_ptr = ptr.add(self.pos);
            ptr::copy_nonoverlapping(index_ptr, hole_ptr, 1);
        }
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // fill the hole again
        // SAFETY: pos is always in bounds and its slot is logically uninitialised
        unsafe {
            let pos = self.pos;
            ptr::copy_nonoverlapping(&*self.elt, self.data.get_unchecked_mut(pos), 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::{array, cell::Cell};

    use super::Hole;
    struct Droppy {
        value: usize,
        drop_count: Rc<Cell<usize>>,
    }

    impl Drop for Droppy {
        fn drop(&mut self) {
            self.drop_count.set(self.drop_count.get() + 1);
        }
    }

    #[test]
    fn hole() {
        const ITEMS: usize = 4;
        let drops: [_; ITEMS] = array::from_fn(|_| Rc::new(Cell::new(0)));
        let mut items: [_; ITEMS] = array::from_fn(|idx| Droppy {
            value: idx,
            drop_count: Rc::clone(&drops[idx]),
        });

        let mut hole = unsafe { Hole::new(&mut items, 1) };
        assert_eq!(hole.element().value, 1);
        unsafe {
            assert_eq!(hole.get(3).value, 3);
            hole.move_to(3);
            hole.move_to(0);
        };
        assert_eq!(hole.pos(), 0);
        drop(hole);
        // After drop of hole, the array is reordered as expected
        assert!(items.iter().map(|it| it.value).eq([1, 3, 2, 0]));
        // and no elemenets were dropped
        assert!(drops.iter().all(|drop_count| drop_count.get() == 0));
        drop(items);
        assert!(drops.iter().all(|drop_count| drop_count.get() == 1));
    }
}
