//! # Signature Queries
//!
//! Selects every live entity whose signature is a superset of a filter.
//!
//! ## Matching rule
//!
//! A slot matches `filter` when `slot & (filter | EntityState) == filter | EntityState`.
//! The `EntityState` bit is always added, so freed slots (empty signature)
//! never match, including for an empty filter.
//!
//! ## Ordering
//!
//! Slots are scanned in ascending index order and results come out in that
//! order. A result is a snapshot: later structural changes do not update it,
//! so re-query after creating, destroying, attaching or detaching.
//!
//! Each bit names exactly one registered type. Types that merely look
//! related (a struct embedding another) never match each other.

use super::bundle::ComponentSet;
use super::entity::EntityIndex;
use super::error::EcsResult;
use super::manager::EntityManager;
use super::signature::Signature;

impl EntityManager {
    /// Returns every live entity whose signature contains `filter`, in
    /// ascending index order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use census_core::EntityManager;
    ///
    /// # fn main() -> census_core::EcsResult<()> {
    /// let mut manager = EntityManager::new::<(i32, f32)>()?;
    /// manager.create_entity_with((1_i32,))?;
    /// manager.create_entity_with((2_i32, 2.0_f32))?;
    ///
    /// let filter = manager.signature_of::<(i32, f32)>()?;
    /// assert_eq!(manager.get_entities(filter).len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn get_entities(&self, filter: Signature) -> Vec<EntityIndex> {
        self.iter_matching(filter).collect()
    }

    /// Clears `out` and refills it with the entities matching `filter`.
    ///
    /// Reuses the buffer's allocation across repeated queries.
    pub fn get_entities_into(&self, filter: Signature, out: &mut Vec<EntityIndex>) {
        out.clear();
        out.extend(self.iter_matching(filter));
    }

    /// Lazily iterates the entities matching `filter` in ascending order.
    pub fn iter_matching(&self, filter: Signature) -> impl Iterator<Item = EntityIndex> + '_ {
        let required = filter | self.active_bit();
        self.signatures()
            .iter()
            .enumerate()
            .filter(move |(_, signature)| signature.contains_all(required))
            .map(|(index, _)| EntityIndex::from_slot(index))
    }

    /// Counts the entities matching `filter` without collecting them.
    #[must_use]
    pub fn count_matching(&self, filter: Signature) -> usize {
        self.iter_matching(filter).count()
    }

    /// Returns every live entity carrying all types in `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`](super::error::EcsError::UnregisteredComponent)
    /// if any type was not declared.
    pub fn query<C: ComponentSet>(&self) -> EcsResult<Vec<EntityIndex>> {
        Ok(self.get_entities(self.signature_of::<C>()?))
    }
}
