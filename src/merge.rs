//! Implementation of [`Merged`], the synchronous driver

use core::{fmt, iter::FusedIterator};

use crate::{
    frontier::Frontier,
    key::KeyFn,
    source::{IterSource, Source, TryIterSource},
};

mod builder;
pub(crate) mod engine;
pub use builder::Builder;
pub(crate) use builder::assemble;

use engine::{Engine, Step};

/// Lazy iterator over merged sources.
///
/// Every call to [`next`](Iterator::next) does just enough work to produce one element: the
/// first call pulls one element from every source, later calls refill only the source whose
/// element was emitted last. Dropping the iterator releases every source not released yet.
///
/// Over [`IterSource`]s it yields the elements themselves. Over [`TryIterSource`]s it yields
/// `Result`s: the first fault of any source is yielded once, all sources are released and the
/// iterator ends.
pub struct Merged<S, KF, F>
where
    S: Source,
    KF: KeyFn<S::Item>,
{
    engine: Engine<S, S::Item, KF, F>,
}

impl<S, KF, F> Merged<S, KF, F>
where
    S: Source,
    KF: KeyFn<S::Item>,
    F: Frontier<usize, KF::Key>,
{
    #[inline]
    pub(crate) fn new(engine: Engine<S, S::Item, KF, F>) -> Self {
        Self { engine }
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

    /// Stops the merge and releases every source now.
    ///
    /// The iterator yields nothing afterwards.
    pub fn close(&mut self) {
        self.engine.cancel();
    }

    fn step(&mut self) -> Result<Option<S::Item>, S::Error> {
        loop {
            match self.engine.advance() {
                Step::Pull(idx) => {
                    let pulled = match self.engine.cursor_mut(idx) {
                        Some(cursor) => cursor.pull(),
                        None => Ok(None),
                    };
                    match pulled {
                        Ok(pulled) => {
                            if let Some(item) = self.engine.settle(idx, pulled) {
                                return Ok(Some(item));
                            }
                        }
                        Err(err) => {
                            self.engine.abort(idx);
                            return Err(err);
                        }
                    }
                }
                Step::Emit(item) => return Ok(Some(item)),
                Step::Done => return Ok(None),
            }
        }
    }

    /// Bounds on the remaining elements: open sources' hints plus the heads already pulled
    fn remaining(&self) -> (usize, Option<usize>) {
        let mut min = 0_usize;
        let mut max = Some(0_usize);
        self.engine.cursors().for_each_open(|cursor, has_head| {
            let (it_min, it_max) = cursor.size_hint();
            let held = usize::from(has_head);
            min = min.saturating_add(it_min).saturating_add(held);
            max = max.and_then(|max| max.checked_add(it_max?)?.checked_add(held));
        });
        (min, max)
    }
}

impl<I, KF, F> Iterator for Merged<IterSource<I>, KF, F>
where
    I: Iterator,
    KF: KeyFn<I::Item>,
    F: Frontier<usize, KF::Key>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(item) => item,
            Err(never) => match never {},
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining()
    }
}

impl<I, T, E, KF, F> Iterator for Merged<TryIterSource<I>, KF, F>
where
    I: Iterator<Item = Result<T, E>>,
    KF: KeyFn<T>,
    F: Frontier<usize, KF::Key>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // a fault ends the merge early
        let (_, max) = self.remaining();
        (0, max.map(|max| max.saturating_add(1)))
    }
}

// Once the engine is done every cursor is released and it stays done
impl<I, KF, F> FusedIterator for Merged<IterSource<I>, KF, F>
where
    I: Iterator,
    KF: KeyFn<I::Item>,
    F: Frontier<usize, KF::Key>,
{
}

impl<I, T, E, KF, F> FusedIterator for Merged<TryIterSource<I>, KF, F>
where
    I: Iterator<Item = Result<T, E>>,
    KF: KeyFn<T>,
    F: Frontier<usize, KF::Key>,
{
}

impl<S, KF, F> fmt::Debug for Merged<S, KF, F>
where
    S: Source,
    KF: KeyFn<S::Item>,
    F: Frontier<usize, KF::Key>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merged")
            .field("engine", &self.engine)
            .finish()
    }
}
