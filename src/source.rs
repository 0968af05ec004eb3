//! Source cursors: pull-based handles over one already-sorted input.
//!
//! A merge owns one cursor per input. The cursor is released (dropped) exactly once, either when
//! it reports end-of-data or when the merge itself stops.
//!
//! [`IterSource`] and [`TryIterSource`] adapt iterators for [`Merged`](crate::Merged),
//! [`StreamSource`] and [`TryStreamSource`] adapt streams for
//! [`MergedStream`](crate::MergedStream).

use core::{
    convert::Infallible,
    task::{Context, Poll},
};

use futures::{Stream, StreamExt};

/// Synchronous cursor: every call to [`pull`](Source::pull) does the work in place.
pub trait Source {
    /// Element produced by the cursor
    type Item;
    /// Fault raised while pulling
    type Error;

    /// Pulls the next element. `Ok(None)` signals end-of-data; the merge never pulls again
    /// after that.
    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error>;

    /// Bounds on the number of elements not pulled yet, see [`Iterator::size_hint`].
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

/// Cooperative cursor: a pull may suspend and is resumed by the task's waker.
pub trait AsyncSource: Unpin {
    /// Element produced by the cursor
    type Item;
    /// Fault raised while pulling
    type Error;

    /// Attempts to pull the next element, registering the current task for wakeup if it is not
    /// available yet. `Ready(Ok(None))` signals end-of-data.
    fn poll_pull(&mut self, cx: &mut Context<'_>) -> Poll<Result<Option<Self::Item>, Self::Error>>;
}

/// Cursor over an infallible [`Iterator`]
#[derive(Debug, Clone)]
pub struct IterSource<I>(pub I);

impl<I: Iterator> Source for IterSource<I> {
    type Item = I::Item;
    type Error = Infallible;

    #[inline]
    fn pull(&mut self) -> Result<Option<I::Item>, Infallible> {
        Ok(self.0.next())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Cursor over an [`Iterator`] of [`Result`]s; an `Err` item is a fault of the source
#[derive(Debug, Clone)]
pub struct TryIterSource<I>(pub I);

impl<I, T, E> Source for TryIterSource<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = T;
    type Error = E;

    #[inline]
    fn pull(&mut self) -> Result<Option<T>, E> {
        self.0.next().transpose()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Cursor over an infallible [`Stream`]
#[derive(Debug)]
pub struct StreamSource<S>(pub S);

impl<S> AsyncSource for StreamSource<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;
    type Error = Infallible;

    #[inline]
    fn poll_pull(&mut self, cx: &mut Context<'_>) -> Poll<Result<Option<S::Item>, Infallible>> {
        self.0.poll_next_unpin(cx).map(Ok)
    }
}

/// Cursor over a [`Stream`] of [`Result`]s; an `Err` item is a fault of the source
#[derive(Debug)]
pub struct TryStreamSource<S>(pub S);

impl<S, T, E> AsyncSource for TryStreamSource<S>
where
    S: Stream<Item = Result<T, E>> + Unpin,
{
    type Item = T;
    type Error = E;

    #[inline]
    fn poll_pull(&mut self, cx: &mut Context<'_>) -> Poll<Result<Option<T>, E>> {
        self.0.poll_next_unpin(cx).map(Option::transpose)
    }
}
