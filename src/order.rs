//! Comparison strategies and the stored-key/probe contract.
//!
//! Deduplication is driven by a *strict ordering* relation, not by
//! `Eq`: two keys are equivalent iff neither orders strictly before
//! the other. This is what lets a tolerance band stand in for
//! equality: values inside the band compare "neither less" and are
//! treated as the same key.
//!
//! Three strategies are provided:
//!
//! - [`Exact`]: plain `<` on any `PartialOrd` scalar
//! - [`Tolerant`]: banded comparison with relative/absolute tolerances
//! - [`Shortlex`]: lifts a scalar strategy to variable-length slices,
//!   ordering shorter slices first
//!
//! [`AsProbe`] is the ownership side of the key contract: a stored key
//! exposes a borrowed view (its *probe* type) that is all the
//! comparator ever sees. Lookups take `&K::Probe`, so membership can
//! be tested against externally-owned data without building an owned
//! key first; only [`UniqueList`](crate::UniqueList) insertion of a
//! genuinely new key ever stores anything.

/// Strict ordering strategy injected into the collection.
///
/// Implementations decide when `a` orders strictly before `b`.
/// Equivalence is derived: `a` and `b` are equivalent iff neither
/// is strictly less than the other.
pub trait StrictOrder<T: ?Sized> {
    /// Returns `true` if `a` orders strictly before `b`.
    fn strictly_less(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if neither operand orders strictly before the other.
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.strictly_less(a, b) && !self.strictly_less(b, a)
    }
}

/// Exact strict ordering: plain `<`.
///
/// For array keys this would be lexicographic, not shortlex; use
/// [`Shortlex<Exact>`] for slices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

impl<T: PartialOrd + ?Sized> StrictOrder<T> for Exact {
    #[inline]
    fn strictly_less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Banded strict ordering with relative and absolute tolerances.
///
/// `a` is strictly less than `b` iff `a < b - |b| * rtol - atol`.
/// The band is computed from the magnitude of the *second* operand,
/// not a symmetric function of both. That asymmetry is part of the
/// contract: callers relying on it (e.g. caches keyed by previously
/// seen samples) get the same dead zone the original comparison used.
///
/// Equivalence under a band is not transitive, so this is not a
/// strict weak ordering in the mathematical sense. With tolerances
/// well below the spacing of stored keys the collection behaves as
/// expected; see the tests at the bottom of this module for the
/// boundary behavior.
///
/// # Example
///
/// ```
/// use uniquelist::{StrictOrder, Tolerant};
///
/// let cmp = Tolerant::default(); // rtol = atol = 1e-6
/// assert!(cmp.equivalent(&4.9, &4.8999999999));
/// assert!(!cmp.equivalent(&4.9, &4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerant {
    /// Relative tolerance, scaled by the second operand's magnitude.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Tolerant {
    /// Creates a banded comparator with the given tolerances.
    pub const fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }
}

impl Default for Tolerant {
    /// Both tolerances default to `1e-6`.
    fn default() -> Self {
        Self::new(1e-6, 1e-6)
    }
}

macro_rules! impl_tolerant_for_scalar {
    ($($ty:ty),*) => {
        $(
            impl StrictOrder<$ty> for Tolerant {
                #[inline]
                fn strictly_less(&self, a: &$ty, b: &$ty) -> bool {
                    let a = *a as f64;
                    let b = *b as f64;
                    a < b - b.abs() * self.rtol - self.atol
                }
            }
        )*
    };
}

impl_tolerant_for_scalar!(f32, f64, i16, i32, i64);

/// Shortlex ordering over slices, parameterized by a scalar strategy.
///
/// A shorter slice always orders before a longer one, regardless of
/// contents. Equal-length slices compare element-wise left to right
/// under the inner strategy; the first differing element decides.
///
/// # Example
///
/// ```
/// use uniquelist::{Exact, Shortlex, StrictOrder};
///
/// let cmp = Shortlex(Exact);
/// // Length decides before contents
/// assert!(cmp.strictly_less(&[9.0][..], &[0.0, 0.0][..]));
/// // Same length: first differing element decides
/// assert!(cmp.strictly_less(&[1.0, 2.0][..], &[1.0, 3.0][..]));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shortlex<C>(pub C);

impl<T, C: StrictOrder<T>> StrictOrder<[T]> for Shortlex<C> {
    fn strictly_less(&self, a: &[T], b: &[T]) -> bool {
        if a.len() != b.len() {
            return a.len() < b.len();
        }
        for (x, y) in a.iter().zip(b.iter()) {
            if self.0.strictly_less(x, y) {
                return true;
            }
            if self.0.strictly_less(y, x) {
                return false;
            }
        }
        false
    }
}

/// Stored key with a borrowed comparison view.
///
/// `Probe` is the type comparators operate on and lookups accept.
/// For scalars the probe is the scalar itself; for
/// [`ArrayKey`](crate::ArrayKey) it is the unsized slice `[T]`, so a
/// borrowed `&[T]` aliasing caller-owned memory can be used to test
/// membership but can never be stored; persistent entries only enter
/// the collection as owned `K` values.
pub trait AsProbe {
    /// Borrowed comparison view of the stored key.
    type Probe: ?Sized;

    /// Returns the comparison view of this key.
    fn as_probe(&self) -> &Self::Probe;
}

macro_rules! impl_as_probe_for_scalar {
    ($($ty:ty),*) => {
        $(
            impl AsProbe for $ty {
                type Probe = $ty;

                #[inline]
                fn as_probe(&self) -> &$ty {
                    self
                }
            }
        )*
    };
}

impl_as_probe_for_scalar!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize);
