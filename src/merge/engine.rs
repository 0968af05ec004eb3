use alloc::vec::Vec;
use core::{fmt, mem};

use tracing::debug;

use crate::{cursor::Cursors, frontier::Frontier, key::KeyFn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No other sources: slot 0 is replayed verbatim
    Passthrough,
    /// Pulling the first element of every source, next slot to pull
    Seeding(usize),
    /// Emitting from the frontier, slot to refill before the next extraction
    Draining(Option<usize>),
    Done,
}

/// What the driver has to do to make progress
pub(crate) enum Step<T> {
    /// Pull the cursor of the slot and hand the result to [`Engine::settle`]
    Pull(usize),
    Emit(T),
    Done,
}

/// Merge state machine shared by the sync and async drivers.
///
/// The engine never pulls by itself: [`advance`](Engine::advance) tells the driver which cursor
/// to pull, and the driver reports back through [`settle`](Engine::settle) or
/// [`abort`](Engine::abort). The cursor whose head was just emitted is refilled on the next
/// demand, not eagerly.
pub(crate) struct Engine<S, T, KF: KeyFn<T>, F> {
    cursors: Cursors<S, T>,
    frontier: F,
    key_of: KF,
    state: State,
    seeding: Vec<(usize, KF::Key)>,
    emitted: usize,
}

impl<S, T, KF, F> Engine<S, T, KF, F>
where
    KF: KeyFn<T>,
    F: Frontier<usize, KF::Key>,
{
    pub(crate) fn new(cursors: Vec<S>, key_of: KF, frontier: F, passthrough: bool) -> Self {
        let sources = cursors.len();
        Self {
            cursors: Cursors::new(cursors),
            frontier,
            key_of,
            state: if passthrough {
                State::Passthrough
            } else {
                State::Seeding(0)
            },
            seeding: Vec::with_capacity(if passthrough { 0 } else { sources }),
            emitted: 0,
        }
    }

    #[inline]
    pub(crate) fn cursors(&self) -> &Cursors<S, T> {
        &self.cursors
    }

    #[inline]
    pub(crate) fn cursor_mut(&mut self, idx: usize) -> Option<&mut S> {
        self.cursors.cursor_mut(idx)
    }

    #[inline]
    pub(crate) fn is_done(&self) -> bool {
        self.state == State::Done
    }

    #[inline]
    pub(crate) fn emitted(&self) -> usize {
        self.emitted
    }

    pub(crate) fn advance(&mut self) -> Step<T> {
        loop {
            match self.state {
                State::Passthrough => return Step::Pull(0),
                State::Seeding(idx) if idx < self.cursors.len() => return Step::Pull(idx),
                State::Seeding(_) => self.seeded(),
                State::Draining(Some(idx)) => return Step::Pull(idx),
                State::Draining(None) => {
                    if let Some(item) = self.emit() {
                        return Step::Emit(item);
                    }
                }
                State::Done => return Step::Done,
            }
        }
    }

    /// Takes the result of pulling slot `idx`. Returns the element if it
    /// has to be emitted right away.
    pub(crate) fn settle(&mut self, idx: usize, pulled: Option<T>) -> Option<T> {
        match (self.state, pulled) {
            (State::Passthrough, Some(item)) => {
                self.emitted += 1;
                return Some(item);
            }
            (State::Passthrough, None) => self.finish(),
            (State::Seeding(_), Some(item)) => {
                let key = self.key_of.key_of(&item);
                self.cursors.set_head(idx, item);
                self.seeding.push((idx, key));
                self.state = State::Seeding(idx + 1);
            }
            (State::Seeding(_), None) => {
                self.cursors.release(idx);
                self.state = State::Seeding(idx + 1);
            }
            (State::Draining(_), Some(item)) => {
                let key = self.key_of.key_of(&item);
                self.cursors.set_head(idx, item);
                self.state = State::Draining(None);
                self.frontier.insert(idx, key);
            }
            (State::Draining(_), None) => {
                self.cursors.release(idx);
                self.state = State::Draining(None);
            }
            (State::Done, _) => {}
        }
        None
    }

    /// Pulling slot `idx` faulted: stop and release everything.
    pub(crate) fn abort(&mut self, idx: usize) {
        debug!(source = idx, "source fault, aborting merge");
        self.finish();
    }

    /// Stops the merge on the consumer's request.
    pub(crate) fn cancel(&mut self) {
        if self.state != State::Done {
            debug!(emitted = self.emitted, "merge cancelled");
            self.finish();
        }
    }

    fn seeded(&mut self) {
        self.state = State::Draining(None);
        self.frontier.seed(mem::take(&mut self.seeding));
        debug!(
            sources = self.cursors.len(),
            active = self.frontier.len(),
            "frontier seeded"
        );
    }

    fn emit(&mut self) -> Option<T> {
        let Some((idx, _key)) = self.frontier.extract_min() else {
            self.finish();
            return None;
        };
        self.state = State::Draining(Some(idx));
        let item = self.cursors.take_head(idx);
        debug_assert!(item.is_some(), "frontier entry for slot {idx} without a head");
        if item.is_some() {
            self.emitted += 1;
        }
        item
    }

    fn finish(&mut self) {
        if self.state == State::Done {
            return;
        }
        self.state = State::Done;
        self.seeding.clear();
        self.frontier.clear();
        self.cursors.release_all();
        debug!(emitted = self.emitted, "merge finished");
    }
}

impl<S, T, KF, F> fmt::Debug for Engine<S, T, KF, F>
where
    KF: KeyFn<T>,
    F: Frontier<usize, KF::Key>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("sources", &self.cursors.len())
            .field("open", &self.cursors.open())
            .field("queued", &self.frontier.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}
