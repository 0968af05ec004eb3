//! Implementation of [`MergedStream`], the asynchronous driver
//!
//! The stream runs the same state machine as [`Merged`](crate::Merged). Pulling a source is its
//! only suspension point: when the source isn't ready the stream returns `Pending` and resumes the
//! same pull on the next poll. Sources are never polled concurrently; the one polled is always
//! the one the frontier asks for.

use core::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    future::BoxFuture,
    ready,
    stream::{FusedStream, Stream},
    FutureExt,
};

use crate::{
    frontier::Frontier,
    key::KeyFn,
    merge::engine::{Engine, Step},
    source::{AsyncSource, StreamSource, TryStreamSource},
};

/// Lazy stream over merged asynchronous sources.
///
/// Over [`StreamSource`]s it yields the elements, over [`TryStreamSource`]s it yields
/// `Result`s and ends after the first fault. Dropping the stream cancels the merge and releases
/// every source.
///
/// # Example
///
/// ```
/// use futures::{executor::block_on, stream, StreamExt};
/// use sorted_merge::Builder;
///
/// let merged = Builder::new()
///     .primary(stream::iter([3, 7, 11]))
///     .others([stream::iter([2, 4, 20]), stream::iter([17, 19, 25])])
///     .build_stream()?;
/// let res: Vec<_> = block_on(merged.collect());
/// assert_eq!(res, [2, 3, 4, 7, 11, 17, 19, 20, 25]);
/// # Ok::<(), sorted_merge::MergeError>(())
/// ```
pub struct MergedStream<S, KF, F>
where
    S: AsyncSource,
    KF: KeyFn<S::Item>,
{
    engine: Engine<S, S::Item, KF, F>,
    cancel: Option<BoxFuture<'static, ()>>,
}

impl<S, KF, F> MergedStream<S, KF, F>
where
    S: AsyncSource,
    KF: KeyFn<S::Item>,
    F: Frontier<usize, KF::Key>,
{
    #[inline]
    pub(crate) fn new(engine: Engine<S, S::Item, KF, F>) -> Self {
        Self {
            engine,
            cancel: None,
        }
    }

    /// Stops the merge once `signal` completes.
    ///
    /// The signal is checked every time the stream is polled, before anything is pulled. Once
    /// it fires the stream releases every source and ends. A later call replaces the signal.
    ///
    /// ```
    /// use futures::{channel::oneshot, executor::block_on, stream, StreamExt};
    /// use sorted_merge::Builder;
    ///
    /// let (stop, stopped) = oneshot::channel::<()>();
    /// let mut merged = Builder::new()
    ///     .primary(stream::iter(1..))
    ///     .other(stream::iter(1..))
    ///     .build_stream()?
    ///     .cancel_on(async move {
    ///         let _ = stopped.await;
    ///     });
    /// block_on(async {
    ///     assert_eq!(merged.next().await, Some(1));
    ///     stop.send(()).unwrap();
    ///     assert_eq!(merged.next().await, None);
    /// });
    /// assert_eq!(merged.open_sources(), 0);
    /// # Ok::<(), sorted_merge::MergeError>(())
    /// ```
    pub fn cancel_on(mut self, signal: impl Future<Output = ()> + Send + 'static) -> Self {
        self.cancel = Some(signal.boxed());
        self
    }

    /// Stops the merge and releases every source now.
    pub fn cancel(&mut self) {
        self.cancel = None;
        self.engine.cancel();
    }

    /// Number of sources not released yet
    #[inline]
    pub fn open_sources(&self) -> usize {
        self.engine.cursors().open()
    }

    /// Number of elements yielded so far
    #[inline]
    pub fn emitted(&self) -> usize {
        self.engine.emitted()
    }

    fn poll_step(&mut self, cx: &mut Context<'_>) -> Poll<Result<Option<S::Item>, S::Error>> {
        if self.engine.is_done() {
            self.cancel = None;
            return Poll::Ready(Ok(None));
        }
        if let Some(signal) = self.cancel.as_mut() {
            if signal.poll_unpin(cx).is_ready() {
                self.cancel();
                return Poll::Ready(Ok(None));
            }
        }
        loop {
            match self.engine.advance() {
                Step::Pull(idx) => {
                    let pulled = match self.engine.cursor_mut(idx) {
                        Some(cursor) => ready!(cursor.poll_pull(cx)),
                        None => Ok(None),
                    };
                    match pulled {
                        Ok(pulled) => {
                            if let Some(item) = self.engine.settle(idx, pulled) {
                                return Poll::Ready(Ok(Some(item)));
                            }
                        }
                        Err(err) => {
                            self.cancel = None;
                            self.engine.abort(idx);
                            return Poll::Ready(Err(err));
                        }
                    }
                }
                Step::Emit(item) => return Poll::Ready(Ok(Some(item))),
                Step::Done => {
                    self.cancel = None;
                    return Poll::Ready(Ok(None));
                }
            }
        }
    }
}

// No field is ever pinned: sources are `Unpin` and the signal is boxed
impl<S, KF, F> Unpin for MergedStream<S, KF, F>
where
    S: AsyncSource,
    KF: KeyFn<S::Item>,
{
}

impl<St, KF, F> Stream for MergedStream<StreamSource<St>, KF, F>
where
    St: Stream + Unpin,
    KF: KeyFn<St::Item>,
    F: Frontier<usize, KF::Key>,
{
    type Item = St::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_step(cx).map(|res| match res {
            Ok(item) => item,
            Err(never) => match never {},
        })
    }
}

impl<St, T, E, KF, F> Stream for MergedStream<TryStreamSource<St>, KF, F>
where
    St: Stream<Item = Result<T, E>> + Unpin,
    KF: KeyFn<T>,
    F: Frontier<usize, KF::Key>,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_step(cx).map(Result::transpose)
    }
}

impl<St, KF, F> FusedStream for MergedStream<StreamSource<St>, KF, F>
where
    St: Stream + Unpin,
    KF: KeyFn<St::Item>,
    F: Frontier<usize, KF::Key>,
{
    fn is_terminated(&self) -> bool {
        self.engine.is_done()
    }
}

impl<St, T, E, KF, F> FusedStream for MergedStream<TryStreamSource<St>, KF, F>
where
    St: Stream<Item = Result<T, E>> + Unpin,
    KF: KeyFn<T>,
    F: Frontier<usize, KF::Key>,
{
    fn is_terminated(&self) -> bool {
        self.engine.is_done()
    }
}

impl<S, KF, F> fmt::Debug for MergedStream<S, KF, F>
where
    S: AsyncSource,
    KF: KeyFn<S::Item>,
    F: Frontier<usize, KF::Key>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedStream")
            .field("engine", &self.engine)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}
