//! Defines how keys are ordered by a merge.
//!
//! Every frontier orders its entries through a [`Comparator`] over the *key* type, never over
//! the merged elements themselves. [`ByOrd`] is the default, [`ByFunc`] wraps a closure, and
//! [`Directed`] is what the [`Builder`](crate::Builder) actually hands to a frontier: the user's
//! comparator plus the runtime [`Direction`] of the merge.

use core::cmp::Ordering;

/// Trait used to compare keys of merged elements
///
/// Implementations should produce a consistent total ordering, see [`Ord`]
/// documentation for details.
///
/// Producing non-total or inconsistent ordering may result in incorrect behavior
/// (i.e. items are yielded in a wrong order) but will not result in UB.
pub trait Comparator<K>: Sized {
    /// Compares two keys and returns an [`Ordering`]
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K, C> Comparator<K> for &C
where
    C: Comparator<K>,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        C::compare(self, a, b)
    }
}

/// Comparator that uses [`Ord`] to compare keys, default for every merge.
///
/// # Example
///
/// ```
/// use sorted_merge::Builder;
///
/// let res: Vec<_> = Builder::new()
///     .primary(vec![3, 2])
///     .other(vec![4, 1])
///     .descending()
///     .build()
///     .unwrap()
///     .collect();
/// assert_eq!(res, vec![4, 3, 2, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ByOrd;

impl<K: Ord> Comparator<K> for ByOrd {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        Ord::cmp(a, b)
    }
}

/// Comparator that uses a function to compare keys
///
/// Construct via [`Builder::compare_by`](crate::Builder::compare_by)
#[derive(Debug, Clone)]
pub struct ByFunc<F>(pub(crate) F);

impl<K, F> Comparator<K> for ByFunc<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    // Leaving decision to inline this to the compiler because F can be long
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0(a, b)
    }
}

/// Order in which a merge yields its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

impl Direction {
    /// Applies this direction to an ordering produced by the base comparator.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Comparator with a runtime direction.
///
/// Frontiers are all min-first; a descending merge is realised by negating the result of the
/// wrapped comparator.
#[derive(Debug, Clone)]
pub struct Directed<C> {
    comparator: C,
    direction: Direction,
}

impl<C> Directed<C> {
    /// Wraps `comparator` so that it orders keys in `direction`.
    #[inline]
    pub const fn new(comparator: C, direction: Direction) -> Self {
        Self {
            comparator,
            direction,
        }
    }

    /// The direction this comparator orders keys in.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<K, C> Comparator<K> for Directed<C>
where
    C: Comparator<K>,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.direction.apply(self.comparator.compare(a, b))
    }
}
