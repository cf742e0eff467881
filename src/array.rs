//! Owned, immutable numeric buffer keys.
//!
//! [`ArrayKey`] is the persistent form of a variable-length numeric
//! key: an owned boxed slice with an explicit length. Its probe view
//! is the plain slice `[T]`, so callers hand `&[T]` borrows of their
//! own buffers to lookups and hook inserts; the deep copy into an
//! owned `ArrayKey` happens only when a key turns out to be new.

use crate::order::AsProbe;

/// An owned, immutable, variable-length numeric key.
///
/// The backing storage is independent of whatever buffer the key was
/// copied from: mutating the source afterwards does not affect the
/// key.
///
/// # Example
///
/// ```
/// use uniquelist::ArrayKey;
///
/// let mut source = vec![1.0, 2.0, 3.0];
/// let key = ArrayKey::from_slice(&source);
/// source[0] = 99.0;
/// assert_eq!(key.as_slice(), &[1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayKey<T = f64> {
    data: Box<[T]>,
}

impl<T: Clone> ArrayKey<T> {
    /// Deep-copies a borrowed slice into an owned key.
    ///
    /// This is the canonical materialize hook for
    /// [`push_back_with`](crate::UniqueList::push_back_with): pass it
    /// as the hook and the copy is made only for genuinely new keys.
    pub fn from_slice(values: &[T]) -> Self {
        Self {
            data: values.to_vec().into_boxed_slice(),
        }
    }
}

impl<T> ArrayKey<T> {
    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the key has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> From<Vec<T>> for ArrayKey<T> {
    fn from(values: Vec<T>) -> Self {
        Self {
            data: values.into_boxed_slice(),
        }
    }
}

impl<T> core::ops::Deref for ArrayKey<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> AsRef<[T]> for ArrayKey<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> AsProbe for ArrayKey<T> {
    type Probe = [T];

    #[inline]
    fn as_probe(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_is_a_deep_copy() {
        let mut source = vec![2.9, -1.0, 4.9];
        let key = ArrayKey::from_slice(&source);

        source[1] = 42.0;

        assert_eq!(key.as_slice(), &[2.9, -1.0, 4.9]);
    }

    #[test]
    fn from_vec_takes_ownership() {
        let key: ArrayKey<f64> = vec![1.0, 2.0].into();
        assert_eq!(key.len(), 2);
        assert!(!key.is_empty());
    }

    #[test]
    fn empty_key() {
        let key: ArrayKey<f64> = ArrayKey::from_slice(&[]);
        assert!(key.is_empty());
        assert_eq!(key.len(), 0);
    }

    #[test]
    fn probe_view_is_the_slice() {
        use crate::order::AsProbe;

        let key = ArrayKey::from_slice(&[1.0, 2.0]);
        assert_eq!(key.as_probe(), &[1.0, 2.0][..]);
    }
}
