//! Sort-order index: a comparator-driven skip list over external storage.
//!
//! The skip list keeps keys in comparator order with O(log n) expected
//! lookup, insert, and removal, and no rebalancing. Nodes hold the key,
//! the cross-link back into the insertion-order sequence, and forward
//! pointers per level; level 0 is doubly linked (a `backward` pointer)
//! so sorted traversal works in both directions.
//!
//! ```text
//! Level 2:  HEAD ──────────────────► 5.0 ─────────────────► NIL
//!             │                       │
//! Level 1:  HEAD ──────► 1.0 ────────► 5.0 ─────────────────► NIL
//!             │           │            │
//! Level 0:  HEAD ─► 0.5 ◄► 1.0 ◄► 3.9 ◄► 5.0 ◄► 7.2 ──► NIL
//! ```
//!
//! Ordering is delegated to an injected [`StrictOrder`] strategy over
//! the keys' probe views, so the same structure serves exact scalar
//! ordering, tolerance bands, and shortlex slice ordering. There is no
//! upsert: the caller searches first (keeping the predecessor array)
//! and only then decides whether to materialize and link a new key.
//! That is the uniqueness protocol of
//! [`UniqueList`](crate::UniqueList).

use core::marker::PhantomData;

use rand_core::RngCore;

use crate::index::Index;
use crate::order::{AsProbe, StrictOrder};
use crate::storage::Storage;

// ============================================================================
// SkipNode
// ============================================================================

/// A node in the sort-order index.
///
/// Holds the key, the cross-link to the insertion-order node, forward
/// pointers at each level, and the level-0 backward pointer.
#[derive(Debug)]
pub struct SkipNode<K, Idx: Index, const MAX_LEVEL: usize> {
    pub(crate) key: K,
    pub(crate) link: Idx,
    pub(crate) forward: [Idx; MAX_LEVEL],
    pub(crate) backward: Idx,
    level: u8,
}

impl<K, Idx: Index, const MAX_LEVEL: usize> SkipNode<K, Idx, MAX_LEVEL> {
    #[inline]
    fn new(key: K, level: u8) -> Self {
        Self {
            key,
            link: Idx::NONE,
            forward: [Idx::NONE; MAX_LEVEL],
            backward: Idx::NONE,
            level,
        }
    }

    /// Returns a reference to the key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the storage index of this entry's insertion-order node.
    #[inline]
    pub fn link(&self) -> Idx {
        self.link
    }
}

// ============================================================================
// SkipList
// ============================================================================

/// A comparator-ordered skip list over external storage.
///
/// # Type Parameters
///
/// - `K`: stored key type; comparisons go through its probe view
/// - `C`: ordering strategy over `K::Probe`
/// - `S`: storage type holding [`SkipNode`]s
/// - `Idx`: storage index type
/// - `R`: random source for level assignment
/// - `MAX_LEVEL`: tower height cap (16 is comfortable up to ~65K keys)
#[derive(Debug)]
pub struct SkipList<K, C, S, Idx, R, const MAX_LEVEL: usize>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
    Idx: Index,
    R: RngCore,
    S: Storage<SkipNode<K, Idx, MAX_LEVEL>, Index = Idx>,
{
    /// Head pointers per level. `head[i]` is the first node at level i.
    head: [Idx; MAX_LEVEL],
    /// Last node at level 0, for O(1) access to the largest key.
    tail: Idx,
    /// Ordering strategy.
    cmp: C,
    /// Random source for level assignment (p = 1/2).
    rng: R,
    /// Current maximum level in use (0-indexed).
    level: usize,
    /// Number of nodes.
    len: usize,
    _marker: PhantomData<(S, K)>,
}

impl<K, C, S, Idx, R, const MAX_LEVEL: usize> SkipList<K, C, S, Idx, R, MAX_LEVEL>
where
    K: AsProbe,
    C: StrictOrder<K::Probe>,
    Idx: Index,
    R: RngCore,
    S: Storage<SkipNode<K, Idx, MAX_LEVEL>, Index = Idx>,
{
    /// Creates an empty skip list with the given strategy and random source.
    pub fn new(cmp: C, rng: R) -> Self {
        Self {
            head: [Idx::NONE; MAX_LEVEL],
            tail: Idx::NONE,
            cmp,
            rng,
            level: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skip list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the ordering strategy.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the index of the smallest node, or `Idx::NONE` if empty.
    #[inline]
    pub fn first(&self) -> Idx {
        self.head[0]
    }

    /// Returns the index of the largest node, or `Idx::NONE` if empty.
    #[inline]
    pub fn last(&self) -> Idx {
        self.tail
    }

    /// Returns the index of the node after `idx` in sort order.
    #[inline]
    pub fn next(&self, storage: &S, idx: Idx) -> Idx {
        storage.get(idx).expect("invalid index").forward[0]
    }

    /// Returns the index of the node before `idx` in sort order.
    #[inline]
    pub fn prev(&self, storage: &S, idx: Idx) -> Idx {
        storage.get(idx).expect("invalid index").backward
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Finds the node equivalent to `probe`, without predecessors.
    ///
    /// Used for read-only membership tests.
    pub fn find(&self, storage: &S, probe: &K::Probe) -> Option<Idx> {
        let mut current = Idx::NONE;

        for i in (0..=self.level).rev() {
            let mut next = if current.is_none() {
                self.head[i]
            } else {
                storage.get(current).expect("invalid index").forward[i]
            };

            while next.is_some() {
                let node = storage.get(next).expect("invalid index");
                if !self.cmp.strictly_less(node.key.as_probe(), probe) {
                    break;
                }
                current = next;
                next = node.forward[i];
            }
        }

        self.candidate(storage, current, probe)
    }

    /// Searches for `probe`, filling `update` with the predecessor at
    /// each level.
    ///
    /// Returns the equivalent node if one exists. When it does not, the
    /// `update` array is exactly the splice point where a key
    /// equivalent to `probe` would be linked; the hook-insertion
    /// protocol reuses it so a materialized key is placed without a
    /// second search.
    pub fn search(
        &self,
        storage: &S,
        probe: &K::Probe,
        update: &mut [Idx; MAX_LEVEL],
    ) -> Option<Idx> {
        let mut current = Idx::NONE;

        for i in (0..=self.level).rev() {
            let mut next = if current.is_none() {
                self.head[i]
            } else {
                storage.get(current).expect("invalid index").forward[i]
            };

            while next.is_some() {
                let node = storage.get(next).expect("invalid index");
                if !self.cmp.strictly_less(node.key.as_probe(), probe) {
                    break;
                }
                current = next;
                next = node.forward[i];
            }

            update[i] = current;
        }

        self.candidate(storage, current, probe)
    }

    /// Checks whether the node after `current` is equivalent to `probe`.
    #[inline]
    fn candidate(&self, storage: &S, current: Idx, probe: &K::Probe) -> Option<Idx> {
        let next = if current.is_none() {
            self.head[0]
        } else {
            storage.get(current).expect("invalid index").forward[0]
        };

        if next.is_some() {
            let key = &storage.get(next).expect("invalid index").key;
            // next is not strictly less than probe (search stopped), so
            // equivalence only needs the other direction
            if !self.cmp.strictly_less(probe, key.as_probe()) {
                return Some(next);
            }
        }
        None
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts a key at the splice point described by `update`.
    ///
    /// `update` must come from a [`search`](Self::search) (with this
    /// storage) for a probe equivalent to `key` that found nothing.
    /// The cross-link of the new node starts as `Idx::NONE`; the caller
    /// sets it once the counterpart sequence node exists.
    pub fn insert_at(&mut self, storage: &mut S, key: K, update: &[Idx; MAX_LEVEL]) -> Idx {
        let new_level = self.random_level();
        let idx = storage.insert(SkipNode::new(key, new_level));
        self.link_node(storage, idx, new_level, update);
        idx
    }

    /// Generates a level for a new node: geometric, p = 1/2.
    #[inline]
    fn random_level(&mut self) -> u8 {
        let r = self.rng.next_u32();
        (r.trailing_ones() as usize).min(MAX_LEVEL - 1) as u8
    }

    /// Links a newly inserted node into the tower structure.
    fn link_node(&mut self, storage: &mut S, idx: Idx, new_level: u8, update: &[Idx; MAX_LEVEL]) {
        // First pass: collect the forward pointers the new node takes over
        let mut new_forwards = [Idx::NONE; MAX_LEVEL];
        for i in 0..=new_level as usize {
            new_forwards[i] = if update[i].is_none() {
                self.head[i]
            } else {
                storage.get(update[i]).expect("invalid index").forward[i]
            };
        }

        // Second pass: wire the new node
        {
            let node = storage.get_mut(idx).expect("invalid index");
            for i in 0..=new_level as usize {
                node.forward[i] = new_forwards[i];
            }
            node.backward = update[0];
        }

        // Third pass: point predecessors (or heads) at the new node
        for i in 0..=new_level as usize {
            if update[i].is_none() {
                self.head[i] = idx;
            } else {
                storage.get_mut(update[i]).expect("invalid index").forward[i] = idx;
            }
        }

        // Maintain the level-0 back links and the tail
        let next = new_forwards[0];
        if next.is_some() {
            storage.get_mut(next).expect("invalid index").backward = idx;
        } else {
            self.tail = idx;
        }

        if (new_level as usize) > self.level {
            self.level = new_level as usize;
        }

        self.len += 1;
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes the node at `idx` and returns it.
    ///
    /// Predecessors are found by searching for the node's own key, so
    /// this is O(log n) expected.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not valid in storage.
    pub fn remove_node(&mut self, storage: &mut S, idx: Idx) -> SkipNode<K, Idx, MAX_LEVEL> {
        let mut update = [Idx::NONE; MAX_LEVEL];
        self.search_node(storage, idx, &mut update);

        let node_level = {
            let node = storage.get(idx).expect("invalid index");
            node.level as usize
        };

        // Splice out of every level the node participates in
        for i in 0..=node_level {
            let next = storage.get(idx).expect("invalid index").forward[i];
            if update[i].is_none() {
                self.head[i] = next;
            } else {
                storage.get_mut(update[i]).expect("invalid index").forward[i] = next;
            }
        }

        // Maintain the level-0 back links and the tail
        let (next, backward) = {
            let node = storage.get(idx).expect("invalid index");
            (node.forward[0], node.backward)
        };
        if next.is_some() {
            storage.get_mut(next).expect("invalid index").backward = backward;
        } else {
            self.tail = backward;
        }

        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }

        self.len -= 1;
        storage.remove(idx).expect("invalid index")
    }

    /// Fills `update` with the predecessors of the node at `target`,
    /// navigating by the node's own key.
    fn search_node(&self, storage: &S, target: Idx, update: &mut [Idx; MAX_LEVEL]) {
        let target_key = &storage.get(target).expect("invalid index").key;
        let mut current = Idx::NONE;

        for i in (0..=self.level).rev() {
            let mut next = if current.is_none() {
                self.head[i]
            } else {
                storage.get(current).expect("invalid index").forward[i]
            };

            while next.is_some() && next != target {
                let node = storage.get(next).expect("invalid index");
                if !self
                    .cmp
                    .strictly_less(node.key.as_probe(), target_key.as_probe())
                {
                    break;
                }
                current = next;
                next = node.forward[i];
            }

            update[i] = current;
        }
    }

    /// Removes all nodes from the skip list.
    pub fn clear(&mut self, storage: &mut S) {
        let mut idx = self.head[0];
        while idx.is_some() {
            let next = storage.get(idx).expect("invalid index").forward[0];
            storage.remove(idx).expect("invalid index");
            idx = next;
        }

        self.head = [Idx::NONE; MAX_LEVEL];
        self.tail = Idx::NONE;
        self.level = 0;
        self.len = 0;
    }
}
