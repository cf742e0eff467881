//! Insertion-ordered collections of unique keys.
//!
//! This crate provides [`UniqueList`]: a collection that remembers the
//! order keys were added in, rejects duplicates under a caller-chosen
//! ordering rule, and answers membership queries in O(log n). It is a
//! building block for algorithms that accumulate distinct numeric
//! points incrementally, e.g. a cache of previously evaluated samples
//! in a search loop, where "have I seen this value (within tolerance)?"
//! and "in what order did I see things?" are both needed over the same
//! data.
//!
//! # Design
//!
//! One logical entry lives in two structures at once:
//!
//! ```text
//! SkipList  - comparator order, owns the keys, O(log n) membership
//! SeqList   - insertion order, O(1) splice, O(n) positional walks
//! ```
//!
//! Both are node-based structures over slab storage. Nodes reference
//! each other by stable slot index rather than by pointer, so the
//! cross-links stay valid across unrelated insertions and removals and
//! neither structure borrows into the other.
//!
//! Equality is not `Eq`: deduplication runs on a [`StrictOrder`]
//! strategy, and two keys are the same iff neither orders strictly
//! before the other. [`Exact`] gives plain `<`; [`Tolerant`] adds a
//! relative/absolute tolerance band; [`Shortlex`] lifts either to
//! variable-length slices (shorter first, then element-wise).
//!
//! # Quick Start
//!
//! ```
//! use uniquelist::UniqueList;
//!
//! let mut seen: UniqueList<f64> = UniqueList::new();
//!
//! assert_eq!(seen.push_back(3.9), (0, true));
//! assert_eq!(seen.push_back(-1.0), (1, true));
//! // Duplicates report the existing position instead of inserting
//! assert_eq!(seen.push_back(3.9), (0, false));
//!
//! assert!(seen.contains(&-1.0));
//! let in_order: Vec<f64> = seen.iter().copied().collect();
//! assert_eq!(in_order, vec![3.9, -1.0]);
//! ```
//!
//! # Borrowed probes and deferred deep copies
//!
//! For array keys, membership tests and inserts take a borrowed slice
//! and defer the owned copy until the key is known to be new:
//!
//! ```
//! use uniquelist::{ArrayKey, ArrayUniqueList};
//!
//! let mut cache = ArrayUniqueList::new();
//! let sample = vec![2.9, -1.0, 4.9];
//!
//! // `&[f64]` probes never allocate; the deep copy runs once, on miss
//! assert!(!cache.contains(&sample));
//! let (pos, is_new) = cache.push_back_with(&sample, ArrayKey::from_slice);
//! assert_eq!((pos, is_new), (0, true));
//! ```
//!
//! # Concurrency
//!
//! None. The collection is a single-threaded structure; `&mut self`
//! enforces one writer at compile time. Embedding in a threaded host
//! requires an exclusive lock around the whole collection.

#![warn(missing_docs)]

pub mod array;
pub mod index;
pub mod list;
pub mod order;
pub mod skiplist;
pub mod storage;
pub mod unique;

pub use array::ArrayKey;
pub use index::Index;
pub use list::{SeqList, SeqNode};
pub use order::{AsProbe, Exact, Shortlex, StrictOrder, Tolerant};
pub use skiplist::{SkipList, SkipNode};
pub use storage::Storage;
pub use unique::{
    ArrayUniqueList, Cursor, Iter, PositionError, SortedCursor, SortedIter, UniqueList,
};
