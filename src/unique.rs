//! The ordered unique collection.
//!
//! [`UniqueList`] cross-links two structures over two slabs of nodes:
//! an insertion-order sequence ([`SeqList`]) and a comparator-ordered
//! index ([`SkipList`]). Every stored key has exactly one node in
//! each; the nodes point at each other by stable slot index, so either
//! view can reach the other in O(1) and removal always leaves both
//! structures consistent.
//!
//! ```text
//! sorted index : [ <smallest key, link to sequence node>,
//!                  <next key,     link to sequence node>,
//!                  ... ]
//!
//! sequence     : [ <link to the 1st input's sorted entry>,
//!                  <link to the 2nd input's sorted entry>,
//!                  ... ]
//! ```
//!
//! Membership tests and inserts are O(log n) expected; positional
//! queries walk the sequence and are O(n). Duplicate insertion is not
//! an error: it reports the existing entry's position with
//! `is_new = false`.

use core::fmt;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_core::RngCore;
use slab::Slab;

use crate::array::ArrayKey;
use crate::index::Index;
use crate::list::{SeqList, SeqNode};
use crate::order::{AsProbe, Exact, Shortlex, StrictOrder, Tolerant};
use crate::skiplist::{SkipList, SkipNode};

/// Seed for the default level RNG; fixed so layout is reproducible.
const DEFAULT_SEED: u64 = 0x5EED_1157;

/// Collection of variable-length numeric keys, deduplicated by
/// tolerance-banded shortlex comparison.
pub type ArrayUniqueList<T = f64> = UniqueList<ArrayKey<T>, Shortlex<Tolerant>>;

// ============================================================================
// Errors
// ============================================================================

/// Error returned by positional operations.
///
/// Duplicate insertion is never an error; these cover caller-input
/// problems that the original design left unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    /// The position does not exist in the collection.
    OutOfRange {
        /// The offending position.
        index: usize,
        /// Collection size at the time of the call.
        len: usize,
    },
    /// A bulk-removal index sequence was not strictly increasing.
    NotAscending {
        /// Offset into the index sequence where order broke.
        at: usize,
    },
    /// A flag sequence's length differs from the collection size.
    LengthMismatch {
        /// Collection size at the time of the call.
        expected: usize,
        /// Length of the flag sequence.
        got: usize,
    },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for collection of size {len}")
            }
            PositionError::NotAscending { at } => {
                write!(
                    f,
                    "removal indexes must be strictly increasing (violated at offset {at})"
                )
            }
            PositionError::LengthMismatch { expected, got } => {
                write!(f, "expected {expected} flags but got {got}")
            }
        }
    }
}

impl std::error::Error for PositionError {}

// ============================================================================
// UniqueList
// ============================================================================

/// An insertion-ordered collection that rejects duplicate keys.
///
/// Keys are deduplicated under an injected [`StrictOrder`] strategy:
/// two keys are the same iff neither orders strictly before the other,
/// which makes tolerance bands work as equality. The collection keeps
/// both the order keys were added in and a comparator-sorted view of
/// the same entries.
///
/// Once stored, a key is immutable until removed.
///
/// # Example
///
/// ```
/// use uniquelist::UniqueList;
///
/// let mut list: UniqueList<f64> = UniqueList::new();
/// assert_eq!(list.push_back(3.9), (0, true));
/// assert_eq!(list.push_back(-1.0), (1, true));
/// assert_eq!(list.push_back(0.0), (2, true));
/// // Already present: reports the existing position
/// assert_eq!(list.push_back(-1.0), (1, false));
/// assert_eq!(list.insert_before(2, 1.0), Ok((2, true)));
///
/// let order: Vec<f64> = list.iter().copied().collect();
/// assert_eq!(order, vec![3.9, -1.0, 1.0, 0.0]);
/// let sorted: Vec<f64> = list.iter_sorted().copied().collect();
/// assert_eq!(sorted, vec![-1.0, 0.0, 1.0, 3.9]);
/// ```
///
/// # Deferred materialization
///
/// Array keys are expensive to copy, so lookups and inserts accept a
/// borrowed probe and only materialize an owned key when it is
/// genuinely new:
///
/// ```
/// use uniquelist::{ArrayKey, ArrayUniqueList};
///
/// let mut cache = ArrayUniqueList::new();
/// let (pos, is_new) = cache.push_back_with(&[2.9, -1.0, 4.9], ArrayKey::from_slice);
/// assert_eq!((pos, is_new), (0, true));
/// // Within tolerance of the stored key: no copy is made
/// let (pos, is_new) = cache.push_back_with(&[2.9, -1.0, 4.8999999999], ArrayKey::from_slice);
/// assert_eq!((pos, is_new), (0, false));
/// ```
pub struct UniqueList<K, C = Exact, R = SmallRng, const MAX_LEVEL: usize = 16>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
    R: RngCore,
{
    seq_nodes: Slab<SeqNode<usize>>,
    sorted_nodes: Slab<SkipNode<K, usize, MAX_LEVEL>>,
    seq: SeqList<Slab<SeqNode<usize>>, usize>,
    sorted: SkipList<K, C, Slab<SkipNode<K, usize, MAX_LEVEL>>, usize, R, MAX_LEVEL>,
}

impl<K, C, const MAX_LEVEL: usize> UniqueList<K, C, SmallRng, MAX_LEVEL>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
{
    /// Creates an empty collection with the strategy's default
    /// parameters.
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::with_order(C::default())
    }

    /// Creates an empty collection with the given ordering strategy.
    pub fn with_order(cmp: C) -> Self {
        Self::with_order_and_rng(cmp, SmallRng::seed_from_u64(DEFAULT_SEED))
    }
}

impl<K, C, const MAX_LEVEL: usize> Default for UniqueList<K, C, SmallRng, MAX_LEVEL>
where
    K: AsProbe,
    C: StrictOrder<K::Probe> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C, R, const MAX_LEVEL: usize> UniqueList<K, C, R, MAX_LEVEL>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
    R: RngCore,
{
    /// Creates an empty collection with the given strategy and level
    /// random source.
    pub fn with_order_and_rng(cmp: C, rng: R) -> Self {
        Self {
            seq_nodes: Slab::new(),
            sorted_nodes: Slab::new(),
            seq: SeqList::new(),
            sorted: SkipList::new(cmp, rng),
        }
    }

    /// Returns the number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Returns `true` if no keys are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Returns the ordering strategy.
    #[inline]
    pub fn comparator(&self) -> &C {
        self.sorted.comparator()
    }

    /// Removes all keys.
    pub fn clear(&mut self) {
        self.seq.clear(&mut self.seq_nodes);
        self.sorted.clear(&mut self.sorted_nodes);
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns `true` if a key equivalent to `probe` is stored.
    ///
    /// O(log n) expected; does not mutate.
    #[inline]
    pub fn contains(&self, probe: &K::Probe) -> bool {
        self.sorted.find(&self.sorted_nodes, probe).is_some()
    }

    /// Returns the insertion-order position of the key equivalent to
    /// `probe`, if stored.
    ///
    /// The lookup is O(log n); computing the position walks the
    /// sequence and is O(n).
    pub fn position(&self, probe: &K::Probe) -> Option<usize> {
        let found = self.sorted.find(&self.sorted_nodes, probe)?;
        let seq_idx = self
            .sorted_nodes
            .get(found)
            .expect("stale cross-link")
            .link();
        Some(self.seq.position(&self.seq_nodes, seq_idx))
    }

    /// Returns the key at the given insertion-order position.
    ///
    /// O(n): walks the sequence from the front.
    pub fn get(&self, index: usize) -> Option<&K> {
        let seq_idx = self.seq.nth(&self.seq_nodes, index)?;
        let link = self.seq_nodes.get(seq_idx).expect("invalid index").link();
        Some(self.sorted_nodes.get(link).expect("stale cross-link").key())
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Appends `key` if no equivalent key is stored.
    ///
    /// Returns the insertion-order position of the (possibly
    /// pre-existing) equivalent entry, and whether this call created
    /// it. A duplicate candidate is dropped.
    pub fn push_back(&mut self, key: K) -> (usize, bool) {
        match self.locate(key.as_probe()) {
            Ok(pos) => (pos, false),
            Err(update) => {
                self.commit(usize::NONE, key, &update);
                (self.seq.len() - 1, true)
            }
        }
    }

    /// Inserts `key` immediately before the given insertion-order
    /// position, if no equivalent key is stored.
    ///
    /// `index == len()` appends. If an equivalent entry already
    /// exists, the position is ignored (and not validated) and the
    /// existing entry's position is returned with `is_new = false`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::OutOfRange`] if an insertion would
    /// actually happen and `index > len()`.
    pub fn insert_before(&mut self, index: usize, key: K) -> Result<(usize, bool), PositionError> {
        match self.locate(key.as_probe()) {
            Ok(pos) => Ok((pos, false)),
            Err(update) => {
                let len = self.seq.len();
                if index > len {
                    return Err(PositionError::OutOfRange { index, len });
                }
                let before = if index == len {
                    usize::NONE
                } else {
                    self.seq
                        .nth(&self.seq_nodes, index)
                        .expect("index validated above")
                };
                self.commit(before, key, &update);
                Ok((index, true))
            }
        }
    }

    /// Appends the key produced by `materialize` if no key equivalent
    /// to `probe` is stored.
    ///
    /// The hook runs exactly once, and only for a genuinely new key;
    /// for a duplicate probe nothing is allocated or copied. The hook
    /// must return a key equivalent to `probe` under this collection's
    /// strategy; [`ArrayKey::from_slice`] is the canonical deep-copy
    /// hook.
    pub fn push_back_with<F>(&mut self, probe: &K::Probe, materialize: F) -> (usize, bool)
    where
        F: FnOnce(&K::Probe) -> K,
    {
        match self.locate(probe) {
            Ok(pos) => (pos, false),
            Err(update) => {
                let key = materialize(probe);
                self.commit(usize::NONE, key, &update);
                (self.seq.len() - 1, true)
            }
        }
    }

    /// Like [`push_back_with`](Self::push_back_with), but a newly
    /// created entry is placed immediately before the given
    /// insertion-order position.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::OutOfRange`] if an insertion would
    /// actually happen and `index > len()`.
    pub fn insert_before_with<F>(
        &mut self,
        index: usize,
        probe: &K::Probe,
        materialize: F,
    ) -> Result<(usize, bool), PositionError>
    where
        F: FnOnce(&K::Probe) -> K,
    {
        match self.locate(probe) {
            Ok(pos) => Ok((pos, false)),
            Err(update) => {
                let len = self.seq.len();
                if index > len {
                    return Err(PositionError::OutOfRange { index, len });
                }
                let before = if index == len {
                    usize::NONE
                } else {
                    self.seq
                        .nth(&self.seq_nodes, index)
                        .expect("index validated above")
                };
                let key = materialize(probe);
                self.commit(before, key, &update);
                Ok((index, true))
            }
        }
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the key at the given insertion-order
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::OutOfRange`] if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<K, PositionError> {
        let len = self.seq.len();
        let seq_idx = self
            .seq
            .nth(&self.seq_nodes, index)
            .ok_or(PositionError::OutOfRange { index, len })?;
        Ok(self.remove_entry(seq_idx))
    }

    /// Removes the entries at the given insertion-order positions.
    ///
    /// `indexes` must be strictly increasing. The whole input is
    /// validated before anything is removed, so an error leaves the
    /// collection unchanged. Removal is a single forward pass over the
    /// sequence; the cursor consumes the gaps between consecutive
    /// indexes, keeping the operation linear in collection size.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::OutOfRange`] or
    /// [`PositionError::NotAscending`] on malformed input.
    pub fn remove_indices(&mut self, indexes: &[usize]) -> Result<(), PositionError> {
        let len = self.seq.len();
        let mut prev = None;
        for (at, &index) in indexes.iter().enumerate() {
            if index >= len {
                return Err(PositionError::OutOfRange { index, len });
            }
            if let Some(p) = prev {
                if index <= p {
                    return Err(PositionError::NotAscending { at });
                }
            }
            prev = Some(index);
        }

        let mut cursor = self.seq.head();
        let mut at = 0;
        for &index in indexes {
            while at < index {
                cursor = self.seq.next(&self.seq_nodes, cursor);
                at += 1;
            }
            let next = self.seq.next(&self.seq_nodes, cursor);
            self.remove_entry(cursor);
            cursor = next;
            at += 1;
        }
        Ok(())
    }

    /// Removes every entry whose flag is `true`.
    ///
    /// `flags` is aligned 1:1 with the current insertion order and
    /// must have exactly `len()` entries; the length is checked before
    /// anything is removed. Removal is a single forward pass.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::LengthMismatch`] if the flag count
    /// differs from `len()`.
    pub fn remove_flagged(&mut self, flags: &[bool]) -> Result<(), PositionError> {
        let len = self.seq.len();
        if flags.len() != len {
            return Err(PositionError::LengthMismatch {
                expected: len,
                got: flags.len(),
            });
        }

        let mut cursor = self.seq.head();
        for &flag in flags {
            let next = self.seq.next(&self.seq_nodes, cursor);
            if flag {
                self.remove_entry(cursor);
            }
            cursor = next;
        }
        Ok(())
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns a double-ended iterator over keys in insertion order.
    pub fn iter(&self) -> Iter<'_, K, MAX_LEVEL> {
        let front = self.seq.head();
        Iter {
            seq_nodes: &self.seq_nodes,
            sorted_nodes: &self.sorted_nodes,
            front,
            back: self.seq.tail(),
            finished: front.is_none(),
        }
    }

    /// Returns a double-ended iterator over keys in comparator order.
    pub fn iter_sorted(&self) -> SortedIter<'_, K, MAX_LEVEL> {
        let front = self.sorted.first();
        SortedIter {
            sorted_nodes: &self.sorted_nodes,
            front,
            back: self.sorted.last(),
            finished: front.is_none(),
        }
    }

    /// Returns an insertion-order cursor positioned at the first entry.
    pub fn cursor_front(&mut self) -> Cursor<'_, K, C, R, MAX_LEVEL> {
        let current = self.seq.head();
        Cursor {
            list: self,
            current,
        }
    }

    /// Returns an insertion-order cursor positioned at the last entry.
    pub fn cursor_back(&mut self) -> Cursor<'_, K, C, R, MAX_LEVEL> {
        let current = self.seq.tail();
        Cursor {
            list: self,
            current,
        }
    }

    /// Returns a sort-order cursor positioned at the smallest key.
    pub fn sorted_cursor_front(&mut self) -> SortedCursor<'_, K, C, R, MAX_LEVEL> {
        let current = self.sorted.first();
        SortedCursor {
            list: self,
            current,
        }
    }

    /// Returns a sort-order cursor positioned at the largest key.
    pub fn sorted_cursor_back(&mut self) -> SortedCursor<'_, K, C, R, MAX_LEVEL> {
        let current = self.sorted.last();
        SortedCursor {
            list: self,
            current,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Searches for `probe`. A hit yields the existing entry's
    /// insertion-order position; a miss yields the predecessor array
    /// for the splice point where the key belongs.
    fn locate(&self, probe: &K::Probe) -> Result<usize, [usize; MAX_LEVEL]> {
        let mut update = [usize::NONE; MAX_LEVEL];
        match self.sorted.search(&self.sorted_nodes, probe, &mut update) {
            Some(found) => {
                let seq_idx = self
                    .sorted_nodes
                    .get(found)
                    .expect("stale cross-link")
                    .link();
                Ok(self.seq.position(&self.seq_nodes, seq_idx))
            }
            None => Err(update),
        }
    }

    /// Creates the entry in both structures and wires the cross-links.
    ///
    /// `before` is the sequence node to insert in front of, or
    /// `usize::NONE` to append.
    fn commit(&mut self, before: usize, key: K, update: &[usize; MAX_LEVEL]) {
        let sorted_idx = self.sorted.insert_at(&mut self.sorted_nodes, key, update);
        let seq_idx = if before.is_none() {
            self.seq.push_back(&mut self.seq_nodes, sorted_idx)
        } else {
            self.seq.insert_before(&mut self.seq_nodes, before, sorted_idx)
        };
        self.sorted_nodes
            .get_mut(sorted_idx)
            .expect("just inserted")
            .link = seq_idx;
    }

    /// Destroys the entry at a sequence node in both structures.
    fn remove_entry(&mut self, seq_idx: usize) -> K {
        let node = self.seq.remove(&mut self.seq_nodes, seq_idx);
        let sorted = self.sorted.remove_node(&mut self.sorted_nodes, node.link());
        sorted.key
    }
}

impl<K, C, R, const MAX_LEVEL: usize> fmt::Debug for UniqueList<K, C, R, MAX_LEVEL>
where
    K: AsProbe + fmt::Debug,
    C: StrictOrder<K::Probe>,
    R: RngCore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Double-ended iterator over keys in insertion order.
pub struct Iter<'a, K, const MAX_LEVEL: usize> {
    seq_nodes: &'a Slab<SeqNode<usize>>,
    sorted_nodes: &'a Slab<SkipNode<K, usize, MAX_LEVEL>>,
    front: usize,
    back: usize,
    finished: bool,
}

impl<'a, K, const MAX_LEVEL: usize> Iterator for Iter<'a, K, MAX_LEVEL> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.finished {
            return None;
        }
        let node = self.seq_nodes.get(self.front).expect("invalid index");
        if self.front == self.back {
            self.finished = true;
        } else {
            self.front = node.next;
        }
        Some(self.sorted_nodes.get(node.link()).expect("stale cross-link").key())
    }
}

impl<'a, K, const MAX_LEVEL: usize> DoubleEndedIterator for Iter<'a, K, MAX_LEVEL> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.finished {
            return None;
        }
        let node = self.seq_nodes.get(self.back).expect("invalid index");
        if self.front == self.back {
            self.finished = true;
        } else {
            self.back = node.prev;
        }
        Some(self.sorted_nodes.get(node.link()).expect("stale cross-link").key())
    }
}

/// Double-ended iterator over keys in comparator order.
pub struct SortedIter<'a, K, const MAX_LEVEL: usize> {
    sorted_nodes: &'a Slab<SkipNode<K, usize, MAX_LEVEL>>,
    front: usize,
    back: usize,
    finished: bool,
}

impl<'a, K, const MAX_LEVEL: usize> Iterator for SortedIter<'a, K, MAX_LEVEL> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.finished {
            return None;
        }
        let node = self.sorted_nodes.get(self.front).expect("invalid index");
        if self.front == self.back {
            self.finished = true;
        } else {
            self.front = node.forward[0];
        }
        Some(node.key())
    }
}

impl<'a, K, const MAX_LEVEL: usize> DoubleEndedIterator for SortedIter<'a, K, MAX_LEVEL> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.finished {
            return None;
        }
        let node = self.sorted_nodes.get(self.back).expect("invalid index");
        if self.front == self.back {
            self.finished = true;
        } else {
            self.back = node.backward;
        }
        Some(node.key())
    }
}

// ============================================================================
// Cursors
// ============================================================================

/// A cursor over insertion order with removal capability.
///
/// A cursor stays valid across removals of *other* entries made
/// through it; removing the current entry advances to the next one in
/// insertion order. [`into_sorted`](Cursor::into_sorted) converts to a
/// sort-order cursor at the same entry in O(1) through the
/// cross-link.
pub struct Cursor<'a, K, C, R, const MAX_LEVEL: usize>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
    R: RngCore,
{
    list: &'a mut UniqueList<K, C, R, MAX_LEVEL>,
    current: usize,
}

impl<'a, K, C, R, const MAX_LEVEL: usize> Cursor<'a, K, C, R, MAX_LEVEL>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
    R: RngCore,
{
    /// Returns the current key, or `None` if the cursor is exhausted.
    pub fn key(&self) -> Option<&K> {
        if self.current.is_none() {
            return None;
        }
        let link = self
            .list
            .seq_nodes
            .get(self.current)
            .expect("invalid index")
            .link();
        Some(
            self.list
                .sorted_nodes
                .get(link)
                .expect("stale cross-link")
                .key(),
        )
    }

    /// Returns `true` if the cursor has no current entry.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Advances to the next entry in insertion order.
    pub fn move_next(&mut self) {
        if self.current.is_some() {
            self.current = self.list.seq.next(&self.list.seq_nodes, self.current);
        }
    }

    /// Moves to the previous entry in insertion order.
    pub fn move_prev(&mut self) {
        if self.current.is_some() {
            self.current = self.list.seq.prev(&self.list.seq_nodes, self.current);
        }
    }

    /// Returns the current entry's insertion-order position.
    ///
    /// O(n): counts the distance from the front of the sequence.
    pub fn position(&self) -> Option<usize> {
        if self.current.is_none() {
            return None;
        }
        Some(self.list.seq.position(&self.list.seq_nodes, self.current))
    }

    /// Removes the current entry from both structures and advances to
    /// the next entry in insertion order.
    pub fn remove(&mut self) -> Option<K> {
        if self.current.is_none() {
            return None;
        }
        let next = self.list.seq.next(&self.list.seq_nodes, self.current);
        let key = self.list.remove_entry(self.current);
        self.current = next;
        Some(key)
    }

    /// Converts to a sort-order cursor at the same entry, in O(1).
    pub fn into_sorted(self) -> SortedCursor<'a, K, C, R, MAX_LEVEL> {
        let current = if self.current.is_none() {
            usize::NONE
        } else {
            self.list
                .seq_nodes
                .get(self.current)
                .expect("invalid index")
                .link()
        };
        SortedCursor {
            list: self.list,
            current,
        }
    }
}

/// A cursor over comparator order with removal capability.
///
/// The mirror of [`Cursor`]: traversal follows sort order, and
/// [`into_insertion`](SortedCursor::into_insertion) converts back to
/// the insertion-order view of the same entry in O(1).
pub struct SortedCursor<'a, K, C, R, const MAX_LEVEL: usize>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
    R: RngCore,
{
    list: &'a mut UniqueList<K, C, R, MAX_LEVEL>,
    current: usize,
}

impl<'a, K, C, R, const MAX_LEVEL: usize> SortedCursor<'a, K, C, R, MAX_LEVEL>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
    R: RngCore,
{
    /// Returns the current key, or `None` if the cursor is exhausted.
    pub fn key(&self) -> Option<&K> {
        if self.current.is_none() {
            return None;
        }
        Some(
            self.list
                .sorted_nodes
                .get(self.current)
                .expect("invalid index")
                .key(),
        )
    }

    /// Returns `true` if the cursor has no current entry.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Advances to the next entry in sort order.
    pub fn move_next(&mut self) {
        if self.current.is_some() {
            self.current = self.list.sorted.next(&self.list.sorted_nodes, self.current);
        }
    }

    /// Moves to the previous entry in sort order.
    pub fn move_prev(&mut self) {
        if self.current.is_some() {
            self.current = self.list.sorted.prev(&self.list.sorted_nodes, self.current);
        }
    }

    /// Returns the current entry's sort-order position.
    ///
    /// O(n): counts the distance from the smallest key.
    pub fn position(&self) -> Option<usize> {
        if self.current.is_none() {
            return None;
        }
        let mut n = 0;
        let mut idx = self.list.sorted.prev(&self.list.sorted_nodes, self.current);
        while idx.is_some() {
            n += 1;
            idx = self.list.sorted.prev(&self.list.sorted_nodes, idx);
        }
        Some(n)
    }

    /// Removes the current entry from both structures and advances to
    /// the next entry in sort order.
    pub fn remove(&mut self) -> Option<K> {
        if self.current.is_none() {
            return None;
        }
        let next = self.list.sorted.next(&self.list.sorted_nodes, self.current);
        let seq_idx = self
            .list
            .sorted_nodes
            .get(self.current)
            .expect("invalid index")
            .link();
        let key = self.list.remove_entry(seq_idx);
        self.current = next;
        Some(key)
    }

    /// Converts to an insertion-order cursor at the same entry, in O(1).
    pub fn into_insertion(self) -> Cursor<'a, K, C, R, MAX_LEVEL> {
        let current = if self.current.is_none() {
            usize::NONE
        } else {
            self.list
                .sorted_nodes
                .get(self.current)
                .expect("invalid index")
                .link()
        };
        Cursor {
            list: self.list,
            current,
        }
    }
}
