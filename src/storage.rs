//! Storage trait for slab-like containers with stable indices.
//!
//! Storage provides insert/remove/get operations where an index stays
//! valid until its slot is explicitly removed. Node-based structures
//! ([`SeqList`](crate::SeqList), [`SkipList`](crate::SkipList)) keep
//! indices instead of references, so the two halves of a cross-linked
//! container can point into each other without cyclic borrows.
//!
//! The collection in this crate grows without bound, so the canonical
//! backend is the growable `slab::Slab`.

use crate::Index;

/// Slab-like storage with stable indices.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable indices**: an index remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots can be reused by future inserts
pub trait Storage<T> {
    /// Index type for this storage.
    type Index: Index;

    /// Inserts a value, returning its stable index.
    fn insert(&mut self, value: T) -> Self::Index;

    /// Removes and returns the value at `index`, if present.
    fn remove(&mut self, index: Self::Index) -> Option<T>;

    /// Returns a reference to the value at `index`, if present.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Returns a mutable reference to the value at `index`, if present.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all values, making every slot available for reuse.
    fn clear(&mut self);
}

impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;

    #[inline]
    fn insert(&mut self, value: T) -> Self::Index {
        self.insert(value)
    }

    #[inline]
    fn remove(&mut self, index: Self::Index) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: Self::Index) -> Option<&T> {
        self.get(index)
    }

    #[inline]
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T> {
        self.get_mut(index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn clear(&mut self) {
        self.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut storage: slab::Slab<u64> = slab::Slab::new();

        let idx = Storage::insert(&mut storage, 42);
        assert_eq!(Storage::get(&storage, idx), Some(&42));

        let removed = Storage::remove(&mut storage, idx);
        assert_eq!(removed, Some(42));
        assert_eq!(Storage::get(&storage, idx), None);
    }

    #[test]
    fn slot_reuse() {
        let mut storage: slab::Slab<u64> = slab::Slab::new();

        let idx1 = Storage::insert(&mut storage, 1);
        Storage::remove(&mut storage, idx1);

        // Next insert reuses the freed slot
        let idx2 = Storage::insert(&mut storage, 2);
        assert_eq!(idx1, idx2);
    }

    #[test]
    fn remove_nonexistent() {
        let mut storage: slab::Slab<u64> = slab::Slab::new();

        let idx = Storage::insert(&mut storage, 42);
        Storage::remove(&mut storage, idx);

        // Double remove returns None
        assert_eq!(Storage::remove(&mut storage, idx), None);
    }

    #[test]
    fn clear_empties_storage() {
        let mut storage: slab::Slab<u64> = slab::Slab::new();

        Storage::insert(&mut storage, 1);
        Storage::insert(&mut storage, 2);
        Storage::clear(&mut storage);

        assert!(Storage::is_empty(&storage));
    }
}
