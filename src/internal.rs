//! Internal implementation details of this library.
//!
//! [`Hole`] is the panic-safe building block behind [`HeapFrontier`](crate::frontier::HeapFrontier):
//! an element is read out of a slice once, the hole is moved along the sift path by copying
//! neighbours into it, and the element is written back exactly once when the hole drops. A
//! comparator that panics mid-sift therefore leaves the slice fully initialised, with no
//! entry duplicated or lost.
mod hole;

pub(crate) use hole::Hole;
