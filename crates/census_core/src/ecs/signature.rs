//! # Signatures
//!
//! A signature is a fixed-width bitmask over component identities. Bit *k*
//! set on an entity slot means the column with identity *k* holds live data
//! for that slot. The same type doubles as a query filter: a slot matches a
//! filter when its signature is a superset of the filter.
//!
//! ## Performance
//!
//! - Set/clear/test a bit: O(1)
//! - Superset test: one AND and one compare
//! - Iterate set bits: O(set bits) via `trailing_zeros`

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Width of a [`Signature`] in bits, and the hard ceiling on the number of
/// component types a single manager can register.
pub const MAX_COMPONENT_COUNT: usize = 64;

/// Compact identity of a registered component type (`0..MAX_COMPONENT_COUNT`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ComponentId(u8);

impl ComponentId {
    /// Creates an identity from its bit position.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `bit` is not below [`MAX_COMPONENT_COUNT`].
    #[inline]
    #[must_use]
    pub const fn new(bit: u8) -> Self {
        debug_assert!((bit as usize) < MAX_COMPONENT_COUNT);
        Self(bit)
    }

    /// Returns the bit position as a `usize`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the single-bit signature for this identity.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> Signature {
        Signature(1 << self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bitmask describing a set of component identities.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Signature(u64);

impl Signature {
    /// The signature with no bits set.
    pub const EMPTY: Self = Self(0);

    /// Creates a signature from raw bits.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns this signature with `id` added.
    #[inline]
    #[must_use]
    pub const fn with(self, id: ComponentId) -> Self {
        Self(self.0 | id.bit().0)
    }

    /// Returns this signature with `id` removed.
    #[inline]
    #[must_use]
    pub const fn without(self, id: ComponentId) -> Self {
        Self(self.0 & !id.bit().0)
    }

    /// Adds `id` in place.
    #[inline]
    pub fn insert(&mut self, id: ComponentId) {
        self.0 |= id.bit().0;
    }

    /// Removes `id` in place.
    #[inline]
    pub fn remove(&mut self, id: ComponentId) {
        self.0 &= !id.bit().0;
    }

    /// Clears every bit.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Checks whether `id` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, id: ComponentId) -> bool {
        self.0 & id.bit().0 != 0
    }

    /// Checks whether every bit of `filter` is also set here.
    #[inline]
    #[must_use]
    pub const fn contains_all(self, filter: Self) -> bool {
        self.0 & filter.0 == filter.0
    }

    /// Returns `true` when no bits are set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of identities in the set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the identities in ascending order.
    pub fn iter(self) -> SignatureIter {
        SignatureIter { remaining: self.0 }
    }
}

impl BitOr for Signature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Signature {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Signature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<ComponentId> for Signature {
    fn from(id: ComponentId) -> Self {
        id.bit()
    }
}

impl FromIterator<ComponentId> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(ComponentId::index)).finish()
    }
}

impl IntoIterator for Signature {
    type Item = ComponentId;
    type IntoIter = SignatureIter;

    fn into_iter(self) -> SignatureIter {
        self.iter()
    }
}

/// Iterator over the identities set in a [`Signature`].
pub struct SignatureIter {
    remaining: u64,
}

impl Iterator for SignatureIter {
    type Item = ComponentId;

    #[inline]
    fn next(&mut self) -> Option<ComponentId> {
        if self.remaining == 0 {
            return None;
        }
        // Lowest set bit first
        #[allow(clippy::cast_possible_truncation)]
        let bit = self.remaining.trailing_zeros() as u8;
        self.remaining &= self.remaining - 1;
        Some(ComponentId::new(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}
