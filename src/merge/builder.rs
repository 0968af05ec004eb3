use alloc::vec::Vec;
use core::{cmp::Ordering, iter};

use futures::Stream;

use super::{Engine, Merged};
use crate::{
    comparators::{ByFunc, ByOrd, Comparator, Directed, Direction},
    error::{MergeError, Result},
    frontier::{BinaryHeap, FrontierOf, Strategy},
    key::{ByKey, Identity, KeyFn},
    source::{IterSource, StreamSource, TryIterSource, TryStreamSource},
    stream::MergedStream,
};

/// Builder for [`Merged`] and [`MergedStream`]
///
/// A merge takes a *primary* source and a collection of *other* sources, all of the same type
/// `P`. By default elements are their own keys, keys are compared using [`Ord`], the smallest
/// key is yielded first and the frontier is a [`BinaryHeap`].
///
/// Both the primary and the collection of others are required; an empty collection of others
/// is fine and makes the merge replay the primary verbatim.
///
/// # Examples
///
/// ```
/// use sorted_merge::{Builder, SortedArray};
///
/// let merged: Vec<_> = Builder::new()
///     .primary(vec![3, 7, 11])
///     .others([vec![2, 4, 20], vec![17, 19, 25]])
///     .strategy(SortedArray)
///     .build()?
///     .collect();
/// assert_eq!(merged, [2, 3, 4, 7, 11, 17, 19, 20, 25]);
/// # Ok::<(), sorted_merge::MergeError>(())
/// ```
///
/// Closures given to [`by_key`](Builder::by_key) and [`compare_by`](Builder::compare_by) need
/// their argument types spelled out, since the builder doesn't know the element type until
/// it's built.
#[derive(Debug, Clone)]
pub struct Builder<P, KF = Identity, C = ByOrd, St = BinaryHeap> {
    primary: Option<P>,
    others: Option<Vec<P>>,
    key_of: KF,
    comparator: C,
    direction: Direction,
    strategy: St,
}

impl<P> Builder<P> {
    /// Creates a builder with no sources and default configuration.
    pub fn new() -> Self {
        Self {
            primary: None,
            others: None,
            key_of: Identity,
            comparator: ByOrd,
            direction: Direction::Ascending,
            strategy: BinaryHeap,
        }
    }
}

impl<P> Default for Builder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, KF, C, St> Builder<P, KF, C, St> {
    /// Sets the primary source
    #[inline]
    pub fn primary(mut self, primary: P) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Appends one source to the other sources
    #[inline]
    pub fn other(mut self, other: P) -> Self {
        self.others.get_or_insert_with(Vec::new).push(other);
        self
    }

    /// Appends sources to the other sources. Passing an empty collection still counts as
    /// supplying it.
    pub fn others(mut self, others: impl IntoIterator<Item = P>) -> Self {
        self.others.get_or_insert_with(Vec::new).extend(others);
        self
    }

    /// Orders elements by the key `func` produces for them
    ///
    /// The key is computed once per element, when it is pulled from its source.
    ///
    /// ```
    /// use sorted_merge::Builder;
    ///
    /// let merged: Vec<_> = Builder::new()
    ///     .primary(vec![-1, 3, -5])
    ///     .other(vec![2, -4])
    ///     .by_key(|v: &i32| v.abs())
    ///     .build()?
    ///     .collect();
    /// assert_eq!(merged, [-1, 2, 3, -4, -5]);
    /// # Ok::<(), sorted_merge::MergeError>(())
    /// ```
    #[inline]
    pub fn by_key<F>(self, func: F) -> Builder<P, ByKey<F>, C, St> {
        self.key_fn(ByKey(func))
    }

    /// Orders elements by the key produced by `key_of`
    pub fn key_fn<K>(self, key_of: K) -> Builder<P, K, C, St> {
        Builder {
            primary: self.primary,
            others: self.others,
            key_of,
            comparator: self.comparator,
            direction: self.direction,
            strategy: self.strategy,
        }
    }

    /// Compares keys using `comparator`
    pub fn comparer<C2>(self, comparator: C2) -> Builder<P, KF, C2, St> {
        Builder {
            primary: self.primary,
            others: self.others,
            key_of: self.key_of,
            comparator,
            direction: self.direction,
            strategy: self.strategy,
        }
    }

    /// Compares keys using `func`
    ///
    /// ```
    /// use sorted_merge::Builder;
    ///
    /// let merged: Vec<_> = Builder::new()
    ///     .primary(vec!["Apple", "cherry"])
    ///     .other(vec!["banana", "Date"])
    ///     .compare_by(|a: &&str, b: &&str| a.to_lowercase().cmp(&b.to_lowercase()))
    ///     .build()?
    ///     .collect();
    /// assert_eq!(merged, ["Apple", "banana", "cherry", "Date"]);
    /// # Ok::<(), sorted_merge::MergeError>(())
    /// ```
    #[inline]
    pub fn compare_by<F, K>(self, func: F) -> Builder<P, KF, ByFunc<F>, St>
    where
        F: Fn(&K, &K) -> Ordering,
    {
        self.comparer(ByFunc(func))
    }

    /// Yields the smallest key first. This is the default.
    #[inline]
    pub fn ascending(self) -> Self {
        self.direction(Direction::Ascending)
    }

    /// Yields the largest key first. Every source must be sorted largest-first.
    #[inline]
    pub fn descending(self) -> Self {
        self.direction(Direction::Descending)
    }

    #[inline]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Selects the frontier strategy
    pub fn strategy<St2: Strategy>(self, strategy: St2) -> Builder<P, KF, C, St2> {
        Builder {
            primary: self.primary,
            others: self.others,
            key_of: self.key_of,
            comparator: self.comparator,
            direction: self.direction,
            strategy,
        }
    }
}

impl<P, KF, C, St> Builder<P, KF, C, St>
where
    St: Strategy,
{
    /// Builds the synchronous merge of iterable sources.
    ///
    /// # Errors
    ///
    /// [`MergeError::MissingPrimary`] or [`MergeError::MissingOthers`] if the corresponding
    /// source was never supplied.
    pub fn build(
        self,
    ) -> Result<Merged<IterSource<P::IntoIter>, KF, FrontierOf<St, KF::Key, Directed<C>>>>
    where
        P: IntoIterator,
        KF: KeyFn<P::Item>,
        KF::Key: Clone,
        C: Comparator<KF::Key>,
    {
        let engine = self.engine::<_, P::Item, _>(|p: P| IterSource(p.into_iter()))?;
        Ok(Merged::new(engine))
    }

    /// Builds the synchronous merge of sources yielding [`Result`](core::result::Result)s.
    ///
    /// The merge yields the first `Err` of any source, releases every source and ends.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Builder::build).
    #[allow(clippy::type_complexity)]
    pub fn try_build<T, E>(
        self,
    ) -> Result<Merged<TryIterSource<P::IntoIter>, KF, FrontierOf<St, KF::Key, Directed<C>>>>
    where
        P: IntoIterator<Item = core::result::Result<T, E>>,
        KF: KeyFn<T>,
        KF::Key: Clone,
        C: Comparator<KF::Key>,
    {
        let engine = self.engine::<_, T, _>(|p: P| TryIterSource(p.into_iter()))?;
        Ok(Merged::new(engine))
    }

    /// Builds the asynchronous merge of stream sources.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Builder::build).
    pub fn build_stream(
        self,
    ) -> Result<MergedStream<StreamSource<P>, KF, FrontierOf<St, KF::Key, Directed<C>>>>
    where
        P: Stream + Unpin,
        KF: KeyFn<P::Item>,
        KF::Key: Clone,
        C: Comparator<KF::Key>,
    {
        let engine = self.engine::<_, P::Item, _>(StreamSource)?;
        Ok(MergedStream::new(engine))
    }

    /// Builds the asynchronous merge of streams yielding [`Result`](core::result::Result)s.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Builder::build).
    #[allow(clippy::type_complexity)]
    pub fn try_build_stream<T, E>(
        self,
    ) -> Result<MergedStream<TryStreamSource<P>, KF, FrontierOf<St, KF::Key, Directed<C>>>>
    where
        P: Stream<Item = core::result::Result<T, E>> + Unpin,
        KF: KeyFn<T>,
        KF::Key: Clone,
        C: Comparator<KF::Key>,
    {
        let engine = self.engine::<_, T, _>(TryStreamSource)?;
        Ok(MergedStream::new(engine))
    }

    #[allow(clippy::type_complexity)]
    fn engine<S, T, W>(
        self,
        wrap: W,
    ) -> Result<Engine<S, T, KF, FrontierOf<St, KF::Key, Directed<C>>>>
    where
        W: FnMut(P) -> S,
        KF: KeyFn<T>,
        KF::Key: Clone,
        C: Comparator<KF::Key>,
    {
        let Self {
            primary,
            others,
            key_of,
            comparator,
            direction,
            strategy,
        } = self;
        let primary = primary.ok_or(MergeError::MissingPrimary)?;
        let others = others.ok_or(MergeError::MissingOthers)?;
        Ok(assemble(
            primary,
            others,
            key_of,
            Directed::new(comparator, direction),
            &strategy,
            wrap,
        ))
    }
}

/// Acquires one cursor per source and an empty frontier sized for all of them.
#[allow(clippy::type_complexity)]
pub(crate) fn assemble<P, S, T, KF, C, St, W>(
    primary: P,
    others: Vec<P>,
    key_of: KF,
    comparator: Directed<C>,
    strategy: &St,
    wrap: W,
) -> Engine<S, T, KF, FrontierOf<St, KF::Key, Directed<C>>>
where
    W: FnMut(P) -> S,
    KF: KeyFn<T>,
    KF::Key: Clone,
    C: Comparator<KF::Key>,
    St: Strategy,
{
    let passthrough = others.is_empty();
    let cursors: Vec<S> = iter::once(primary).chain(others).map(wrap).collect();
    let frontier = strategy.frontier::<usize, KF::Key, _>(comparator, cursors.len());
    Engine::new(cursors, key_of, frontier, passthrough)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::Cell;

    use crate::{BinarySearchList, Builder, MergeError, UpdatableQueue};

    #[test]
    fn configuration_errors() {
        let missing_primary = Builder::<Vec<i32>>::new().other(vec![1]).build();
        assert_eq!(missing_primary.err(), Some(MergeError::MissingPrimary));
        let missing_others = Builder::new().primary(vec![1]).build();
        assert_eq!(missing_others.err(), Some(MergeError::MissingOthers));
        let missing_both = Builder::<Vec<i32>>::new().descending().build();
        assert_eq!(missing_both.err(), Some(MergeError::MissingPrimary));
    }

    #[test]
    fn others_accumulate() {
        let merged: Vec<_> = Builder::new()
            .primary(vec![5])
            .other(vec![1])
            .others([vec![3], vec![2]])
            .other(vec![4])
            .strategy(BinarySearchList)
            .build()
            .unwrap()
            .collect();
        assert_eq!(merged, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn passthrough_skips_keys() {
        let calls = Cell::new(0);
        let merged: Vec<_> = Builder::new()
            .primary(vec![3, 1, 2])
            .others([])
            .by_key(|v: &i32| {
                calls.set(calls.get() + 1);
                *v
            })
            .build()
            .unwrap()
            .collect();
        // replayed verbatim, even though it isn't sorted
        assert_eq!(merged, [3, 1, 2]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn key_computed_once_per_element() {
        let calls = Cell::new(0);
        let merged: Vec<_> = Builder::new()
            .primary(vec![(1, 'a'), (4, 'd')])
            .others([vec![(2, 'b')], vec![(3, 'c'), (5, 'e')]])
            .by_key(|v: &(i32, char)| {
                calls.set(calls.get() + 1);
                v.0
            })
            .strategy(UpdatableQueue)
            .build()
            .unwrap()
            .map(|(_, c)| c)
            .collect();
        assert_eq!(merged, ['a', 'b', 'c', 'd', 'e']);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn reconfigure() {
        let merged: Vec<_> = Builder::new()
            .primary(vec![1, 3])
            .other(vec![2])
            .descending()
            .ascending()
            .compare_by(|a: &i32, b: &i32| a.cmp(b))
            .build()
            .unwrap()
            .collect();
        assert_eq!(merged, [1, 2, 3]);
    }
}
