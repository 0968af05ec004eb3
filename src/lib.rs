//! A k-way merge of already-sorted sources with interchangeable frontier strategies.
//!
//! A merge takes a primary source and any number of other sources, each already sorted, and
//! lazily yields all their elements as a single sorted sequence. Ordering is decided on *keys*:
//! the element itself by default, or a projection given to [`Builder::by_key`]. The working set
//! of "next element per source" lives in a [`Frontier`]; six strategies are provided, see the
//! [`frontier`] module.
//!
//! Both a synchronous driver ([`Merged`], an [`Iterator`]) and an asynchronous one
//! ([`MergedStream`], a [`futures::Stream`]) are available. Every source is released exactly
//! once, whether the merge is drained, abandoned, faulted or cancelled.
//!
//! # Quick start
//!
//! ```
//! use sorted_merge::merge;
//!
//! let merged: Vec<_> = merge(vec![3, 7, 11], [vec![2, 4, 20], vec![17, 19, 25]]).collect();
//! assert_eq!(merged, [2, 3, 4, 7, 11, 17, 19, 20, 25]);
//! ```
//!
//! Note that only the next item of each source is considered.
//! If the sources are not sorted, the result won't be sorted either:
//!
//! ```
//! use sorted_merge::merge;
//!
//! let merged: Vec<_> = merge(vec![2, 1, 5], [vec![4, 3, 6]]).collect();
//! assert_eq!(merged, [2, 1, 4, 3, 5, 6]);
//! ```
//!
//! # Configuration
//!
//! Use the [`Builder`] to pick the key, comparator, direction and frontier strategy:
//!
//! ```
//! use sorted_merge::{Buckets, Builder};
//!
//! // sources sorted by descending absolute value
//! let res: Vec<_> = Builder::new()
//!     .primary(vec![-3_i32, -1])
//!     .other(vec![4, 2])
//!     .by_key(|x: &i32| x.abs())
//!     .descending()
//!     .strategy(Buckets)
//!     .build()?
//!     .collect();
//! assert_eq!(res, [4, -3, 2, -1]);
//! # Ok::<(), sorted_merge::MergeError>(())
//! ```
//!
//! # Faults
//!
//! Sources yielding [`Result`](core::result::Result)s are merged with
//! [`Builder::try_build`]: the first `Err` is yielded, every source is released and the merge
//! ends.
//!
//! ```
//! use sorted_merge::Builder;
//!
//! let mut merged = Builder::new()
//!     .primary(vec![Ok(1), Err("disk on fire")])
//!     .other(vec![Ok(2)])
//!     .try_build()?;
//! assert_eq!(merged.next(), Some(Ok(1)));
//! assert_eq!(merged.next(), Some(Err("disk on fire")));
//! assert_eq!(merged.next(), None);
//! # Ok::<(), sorted_merge::MergeError>(())
//! ```
//!
//! # Logging
//!
//! The merge emits [`tracing`] events: `debug` when the frontier is seeded and when the merge
//! finishes, is cancelled or aborts on a fault, `trace` for every released source. No
//! subscriber is installed by this crate.

extern crate alloc;

pub mod comparators;
mod convenience;
mod cursor;
mod error;
pub mod frontier;
mod internal;
pub mod key;
mod merge;
pub mod source;
mod stream;
pub mod updatable_queue;

pub use comparators::{ByFunc, ByOrd, Comparator, Directed, Direction};
pub use convenience::*;
pub use error::{MergeError, Result};
pub use frontier::{
    BinaryHeap, BinarySearchList, BucketFrontier, Buckets, Frontier, FrontierOf, HeapFrontier,
    LinearFrontier, LinearList, LinkedFrontier, QueueFrontier, SortedArray, SortedArrayFrontier,
    Strategy, UpdatableQueue,
};
pub use key::{ByKey, Identity, KeyFn};
pub use merge::{Builder, Merged};
pub use source::{AsyncSource, IterSource, Source, StreamSource, TryIterSource, TryStreamSource};
pub use stream::MergedStream;
pub use updatable_queue::{Handle, UpdatablePriorityQueue};


#[doc(hidden)]
#[doc = include_str!("../README.md")]
struct _ReadmeTest;
