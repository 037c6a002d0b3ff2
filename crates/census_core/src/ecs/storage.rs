//! # Component Storage
//!
//! Dense, slot-indexed storage for a single component type.
//!
//! The storage uses a dense array strategy:
//! - Cell *i* belongs to entity slot *i*, so access is O(1) via entity index
//! - Storage only grows, never shrinks, and growth keeps every existing value
//!   at its index
//! - Iteration is cache-friendly (contiguous memory)
//!
//! A cell only holds meaningful data while the owning manager has the
//! matching signature bit set for that slot. Otherwise it holds a stale or
//! default value that correct callers never read.
//!
//! ## Parallel access
//!
//! Nothing here synchronises. Workers may read and write the *same* column
//! concurrently only through disjoint cells, and only once every growth has
//! completed. [`ComponentStorage::select_mut`] is the safe way to hand out
//! such disjoint cells.

use std::any::{type_name, Any};

use super::component::Component;
use super::entity::EntityIndex;
use super::error::{EcsError, EcsResult};

/// Dense storage for a single component type.
///
/// # Type Parameters
///
/// * `C` - The component type to store
///
/// # Example
///
/// ```rust
/// use census_core::{ComponentStorage, EntityIndex};
///
/// let mut storage: ComponentStorage<i32> = ComponentStorage::new();
/// storage.set(EntityIndex::new(3), 42);
/// assert_eq!(storage.len(), 4);
/// assert_eq!(storage.get(EntityIndex::new(3)), Some(&42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentStorage<C: Component> {
    /// The dense array of components.
    data: Vec<C>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates empty storage with room for `capacity` cells before the first
    /// reallocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of allocated cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no cell has been allocated yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of cells that fit before the backing buffer reallocates.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Gets the cell for an entity.
    ///
    /// Returns `None` only if the index lies beyond the allocated length. The
    /// value is whatever the cell holds, live or not; gate reads by signature.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: EntityIndex) -> Option<&C> {
        self.data.get(entity.index())
    }

    /// Gets the cell for an entity mutably.
    #[inline]
    pub fn get_mut(&mut self, entity: EntityIndex) -> Option<&mut C> {
        self.data.get_mut(entity.index())
    }

    /// Writes a value into the cell for an entity.
    ///
    /// Grows the storage first if the index is past the end. Growth extends to
    /// exactly `index + 1` cells; the backing `Vec` doubles its buffer, which
    /// keeps a create-heavy workload amortized O(1).
    ///
    /// # Arguments
    ///
    /// * `entity` - The slot to write
    /// * `component` - The component value to store
    #[inline]
    pub fn set(&mut self, entity: EntityIndex, component: C) {
        let index = entity.index();
        if index >= self.data.len() {
            self.grow_to(index + 1);
        }
        self.data[index] = component;
    }

    /// Grows the storage to at least `len` cells, filling new cells with
    /// `C::default()`. Never shrinks.
    pub fn grow_to(&mut self, len: usize) {
        if len > self.data.len() {
            self.data.resize_with(len, C::default);
        }
    }

    /// Reserves room for `additional` more cells.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Resets the cell for an entity to `C::default()`.
    #[inline]
    pub fn reset(&mut self, entity: EntityIndex) {
        if let Some(slot) = self.data.get_mut(entity.index()) {
            *slot = C::default();
        }
    }

    /// Returns a slice of all cells, indexed by slot.
    ///
    /// Useful for batch processing.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Returns a mutable slice of all cells, indexed by slot.
    ///
    /// Useful for batch processing. The length cannot be changed through it.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }

    /// Iterates over all cells with their slots.
    pub fn iter(&self) -> impl Iterator<Item = (EntityIndex, &C)> {
        self.data.iter().enumerate().map(|(i, c)| (EntityIndex::from_slot(i), c))
    }

    /// Borrows the cells of the selected entities mutably, one `&mut` per
    /// entity, in selection order.
    ///
    /// The selection must be strictly ascending (as every query result is)
    /// and inside the allocated length. Strict ordering proves the cells are
    /// pairwise disjoint, so the returned references can be split into chunks
    /// and handed to independent workers.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidSelection`] if the selection is not strictly
    /// ascending or names a slot past the end. Nothing is borrowed then.
    pub fn select_mut(&mut self, entities: &[EntityIndex]) -> EcsResult<Vec<&mut C>> {
        validate_selection(entities, self.data.len())?;

        let mut cells = Vec::with_capacity(entities.len());
        let mut rest: &mut [C] = &mut self.data;
        let mut base = 0;
        for entity in entities {
            let index = entity.index();
            let tail = std::mem::take(&mut rest);
            let (_, from_index) = tail.split_at_mut(index - base);
            let (cell, after) =
                from_index
                    .split_first_mut()
                    .ok_or_else(|| EcsError::InvalidSelection {
                        reason: format!("slot {entity} is out of range"),
                    })?;
            cells.push(cell);
            rest = after;
            base = index + 1;
        }
        Ok(cells)
    }
}

fn validate_selection(entities: &[EntityIndex], len: usize) -> EcsResult<()> {
    if let Some(pair) = entities.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(EcsError::InvalidSelection {
            reason: format!("slots must be strictly ascending, found {} then {}", pair[0], pair[1]),
        });
    }
    match entities.last() {
        Some(last) if last.index() >= len => Err(EcsError::InvalidSelection {
            reason: format!("slot {last} is past the column length {len}"),
        }),
        _ => Ok(()),
    }
}

/// Type-erased view of a [`ComponentStorage`], used where the manager has
/// to touch every column without knowing its component type.
pub(crate) trait ErasedStorage: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn len(&self) -> usize;
    fn grow_to(&mut self, len: usize);
    fn reserve(&mut self, additional: usize);
    fn reset(&mut self, entity: EntityIndex);
    fn component_name(&self) -> &'static str;
}

impl<C: Component> ErasedStorage for ComponentStorage<C> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn grow_to(&mut self, len: usize) {
        ComponentStorage::grow_to(self, len);
    }

    fn reserve(&mut self, additional: usize) {
        ComponentStorage::reserve(self, additional);
    }

    fn reset(&mut self, entity: EntityIndex) {
        ComponentStorage::reset(self, entity);
    }

    fn component_name(&self) -> &'static str {
        type_name::<C>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(index: u32) -> EntityIndex {
        EntityIndex::new(index)
    }

    #[test]
    fn test_storage_get_set() {
        let mut storage: ComponentStorage<f32> = ComponentStorage::new();
        storage.set(e(50), 1.5);

        assert_eq!(storage.len(), 51);
        assert_eq!(storage.get(e(50)), Some(&1.5));
        assert_eq!(storage.get(e(10)), Some(&0.0));
    }

    #[test]
    fn test_storage_bounds() {
        let mut storage: ComponentStorage<u8> = ComponentStorage::new();
        storage.grow_to(100);
        assert!(storage.get(e(100)).is_none());
        assert!(storage.get(e(99)).is_some());
    }

    #[test]
    fn test_growth_preserves_values() {
        let mut storage: ComponentStorage<Vec<i32>> = ComponentStorage::new();
        storage.set(e(0), vec![1, 2, 3]);
        storage.set(e(1000), vec![4]);

        assert_eq!(storage.get(e(0)), Some(&vec![1, 2, 3]));
        assert_eq!(storage.get(e(1000)), Some(&vec![4]));

        // Never shrinks
        storage.grow_to(10);
        assert_eq!(storage.len(), 1001);
    }

    #[test]
    fn test_reset() {
        let mut storage: ComponentStorage<i32> = ComponentStorage::new();
        storage.set(e(2), 9);
        storage.reset(e(2));
        assert_eq!(storage.get(e(2)), Some(&0));
    }

    #[test]
    fn test_select_mut() {
        let mut storage: ComponentStorage<i32> = ComponentStorage::new();
        for i in 0..10 {
            storage.set(e(i), i as i32);
        }

        let selection = [e(1), e(4), e(9)];
        for cell in storage.select_mut(&selection).unwrap() {
            *cell *= 10;
        }

        assert_eq!(storage.as_slice(), &[0, 10, 2, 3, 40, 5, 6, 7, 8, 90]);
    }

    #[test]
    fn test_select_mut_rejects_bad_selection() {
        let mut storage: ComponentStorage<i32> = ComponentStorage::new();
        storage.grow_to(5);

        assert!(matches!(
            storage.select_mut(&[e(2), e(2)]),
            Err(EcsError::InvalidSelection { .. })
        ));
        assert!(matches!(
            storage.select_mut(&[e(3), e(1)]),
            Err(EcsError::InvalidSelection { .. })
        ));
        assert!(matches!(
            storage.select_mut(&[e(5)]),
            Err(EcsError::InvalidSelection { .. })
        ));
        assert!(storage.select_mut(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_erased_downcast() {
        let mut erased: Box<dyn ErasedStorage> = Box::new(ComponentStorage::<u16>::new());
        erased.grow_to(4);
        assert_eq!(erased.len(), 4);
        assert_eq!(erased.component_name(), "u16");
        assert!(erased.as_any().downcast_ref::<ComponentStorage<u16>>().is_some());
        assert!(erased.as_any().downcast_ref::<ComponentStorage<u32>>().is_none());
    }
}
