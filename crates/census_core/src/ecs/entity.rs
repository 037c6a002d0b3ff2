//! # Entity Handles
//!
//! Entities are nothing but a recyclable slot index. All of an entity's
//! data lives in the component columns, and which columns are meaningful for
//! it is recorded in the slot's [`Signature`](super::signature::Signature).
//!
//! Handles carry no generation counter. A handle kept across a
//! destroy/recreate cycle names the slot's *new* occupant.

use std::fmt;

/// Handle naming a slot in the entity table.
///
/// Indices are densely packed and recycled: once an entity is destroyed its
/// index goes back on the free list and is handed out again by a later create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct EntityIndex(u32);

impl EntityIndex {
    /// Creates a handle from a raw slot number.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the slot number as a `usize`, ready for indexing columns.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw slot number.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Converts a position in a slot-indexed array back into a handle.
    /// Every allocated slot index came from a `u32`.
    #[allow(clippy::cast_possible_truncation)]
    #[inline]
    pub(crate) const fn from_slot(index: usize) -> Self {
        Self(index as u32)
    }
}

impl From<u32> for EntityIndex {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for EntityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle marker attached to every entity at creation.
///
/// This is an ordinary component. It always owns component identity 0 and
/// every query implicitly requires it, which is how freed slots are kept out
/// of query results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EntityState {
    /// The entity is live.
    Active,
    /// The slot was released. Also the value freshly grown cells start with.
    #[default]
    Destroyed,
}

impl EntityState {
    /// Returns `true` for [`EntityState::Active`].
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
