#![allow(clippy::type_complexity)]
use alloc::vec::Vec;

use futures::Stream;

use crate::{
    comparators::{ByOrd, Directed, Direction},
    frontier::{BinaryHeap, HeapFrontier},
    key::{ByKey, Identity, KeyFn},
    merge::{assemble, Merged},
    source::{IterSource, StreamSource},
    stream::MergedStream,
};

/// [`Merged`] over iterators with the default [`BinaryHeap`] frontier
pub type MergedIter<I, KF = Identity, C = ByOrd> = Merged<
    IterSource<I>,
    KF,
    HeapFrontier<usize, <KF as KeyFn<<I as Iterator>::Item>>::Key, Directed<C>>,
>;

/// [`MergedStream`] over streams with the default [`BinaryHeap`] frontier
pub type MergedStreams<S, KF = Identity, C = ByOrd> = MergedStream<
    StreamSource<S>,
    KF,
    HeapFrontier<usize, <KF as KeyFn<<S as Stream>::Item>>::Key, Directed<C>>,
>;

fn heap_merge<P, KF, T>(
    primary: P,
    others: impl IntoIterator<Item = P>,
    key_of: KF,
    direction: Direction,
) -> MergedIter<P::IntoIter, KF>
where
    P: IntoIterator<Item = T>,
    KF: KeyFn<T>,
    KF::Key: Ord + Clone,
{
    let others: Vec<P> = others.into_iter().collect();
    Merged::new(assemble(
        primary,
        others,
        key_of,
        Directed::new(ByOrd, direction),
        &BinaryHeap,
        |p: P| IterSource(p.into_iter()),
    ))
}

/// Merges `primary` with `others`:
/// * Yields items according to their [`Ord`] implementation, smallest-first
/// * With no `others` the primary is yielded as is
///
/// ```
/// use sorted_merge::merge;
///
/// let merged: Vec<_> = merge(vec![3, 7, 11], [vec![2, 4, 20], vec![17, 19, 25]]).collect();
/// assert_eq!(merged, [2, 3, 4, 7, 11, 17, 19, 20, 25]);
/// ```
pub fn merge<P, Q>(primary: P, others: Q) -> MergedIter<P::IntoIter>
where
    P: IntoIterator,
    P::Item: Ord + Clone,
    Q: IntoIterator<Item = P>,
{
    heap_merge(primary, others, Identity, Direction::Ascending)
}

/// Merges `primary` with `others`, all sorted largest-first:
/// * Yields items according to their [`Ord`] implementation, largest-first
pub fn merge_descending<P, Q>(primary: P, others: Q) -> MergedIter<P::IntoIter>
where
    P: IntoIterator,
    P::Item: Ord + Clone,
    Q: IntoIterator<Item = P>,
{
    heap_merge(primary, others, Identity, Direction::Descending)
}

/// Merges `primary` with `others`:
/// * Yields items with the smallest key according to `func` first
pub fn merge_by_key<P, Q, F, K>(primary: P, others: Q, func: F) -> MergedIter<P::IntoIter, ByKey<F>>
where
    P: IntoIterator,
    Q: IntoIterator<Item = P>,
    F: Fn(&P::Item) -> K,
    K: Ord + Clone,
{
    heap_merge(primary, others, ByKey(func), Direction::Ascending)
}

/// Merges the `primary` stream with `others`:
/// * Yields items according to their [`Ord`] implementation, smallest-first
pub fn merge_streams<S, Q>(primary: S, others: Q) -> MergedStreams<S>
where
    S: Stream + Unpin,
    S::Item: Ord + Clone,
    Q: IntoIterator<Item = S>,
{
    MergedStream::new(assemble(
        primary,
        others.into_iter().collect(),
        Identity,
        Directed::new(ByOrd, Direction::Ascending),
        &BinaryHeap,
        StreamSource,
    ))
}
