//! # Component Columns
//!
//! The heterogeneous set of per-type columns owned by a manager.
//!
//! Columns are kept as boxed [`ErasedStorage`] values indexed by
//! [`ComponentId`]. Typed access looks the type up in the registry and then
//! downcasts the column, so a caller can never get a column of the wrong
//! type. Untyped passes (growing every column, resetting a slot) go through
//! the erased trait.

use std::any::type_name;

use super::component::Component;
use super::entity::EntityIndex;
use super::error::{EcsError, EcsResult};
use super::registry::ComponentRegistry;
use super::signature::{ComponentId, Signature};
use super::storage::{ComponentStorage, ErasedStorage};

/// Identity → column map, plus the registry that assigns the identities.
pub struct ComponentColumns {
    registry: ComponentRegistry,
    columns: Vec<Box<dyn ErasedStorage>>,
    /// Length every column is kept at (highest-ever-allocated slot + 1).
    slot_count: usize,
    /// Cells reserved up front for each newly registered column.
    reserve: usize,
}

impl ComponentColumns {
    /// Creates an empty column set.
    ///
    /// # Arguments
    ///
    /// * `max_components` - Maximum number of component types
    /// * `reserve` - Cells to reserve in every column at registration
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidConfig`] if `max_components` is out of range.
    pub fn new(max_components: usize, reserve: usize) -> EcsResult<Self> {
        Ok(Self {
            registry: ComponentRegistry::new(max_components)?,
            columns: Vec::with_capacity(max_components),
            slot_count: 0,
            reserve,
        })
    }

    /// Registers `C` and creates its column if it does not exist yet.
    ///
    /// A new column is immediately grown to the current slot count, so the
    /// column length invariant holds for late registrations too.
    ///
    /// # Errors
    ///
    /// [`EcsError::CapacityExceeded`] if the registry is full.
    pub fn register<C: Component>(&mut self) -> EcsResult<ComponentId> {
        let id = self.registry.register::<C>()?;
        if id.index() == self.columns.len() {
            let mut column = ComponentStorage::<C>::with_capacity(self.reserve.max(self.slot_count));
            column.grow_to(self.slot_count);
            self.columns.push(Box::new(column));
        }
        Ok(id)
    }

    /// The registry backing this column set.
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Returns the identity of `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was never registered.
    #[inline]
    pub fn id_of<C: Component>(&self) -> EcsResult<ComponentId> {
        self.registry.id_of::<C>()
    }

    /// Returns the single-bit signature of `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was never registered.
    #[inline]
    pub fn bit<C: Component>(&self) -> EcsResult<Signature> {
        self.registry.bit::<C>()
    }

    /// Length every column is kept at.
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Returns the typed column for `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was never registered.
    pub fn get<C: Component>(&self) -> EcsResult<&ComponentStorage<C>> {
        let id = self.id_of::<C>()?;
        self.columns[id.index()]
            .as_any()
            .downcast_ref::<ComponentStorage<C>>()
            .ok_or_else(unregistered::<C>)
    }

    /// Returns the typed column for `C` mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was never registered.
    pub fn get_mut<C: Component>(&mut self) -> EcsResult<&mut ComponentStorage<C>> {
        let id = self.id_of::<C>()?;
        self.columns[id.index()]
            .as_any_mut()
            .downcast_mut::<ComponentStorage<C>>()
            .ok_or_else(unregistered::<C>)
    }

    /// Returns the column for `A` mutably together with the column for `B`
    /// shared.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnregisteredComponent`] if either type is unknown
    /// - [`EcsError::AliasedColumns`] if `A` and `B` are the same type
    pub fn pair_mut<A: Component, B: Component>(
        &mut self,
    ) -> EcsResult<(&mut ComponentStorage<A>, &ComponentStorage<B>)> {
        let a = self.id_of::<A>()?.index();
        let b = self.id_of::<B>()?.index();
        if a == b {
            return Err(EcsError::AliasedColumns {
                component: type_name::<A>(),
            });
        }

        let (a_column, b_column) = if a < b {
            let (head, tail) = self.columns.split_at_mut(b);
            (&mut head[a], &tail[0])
        } else {
            let (head, tail) = self.columns.split_at_mut(a);
            (&mut tail[0], &head[b])
        };

        let a_column = a_column
            .as_any_mut()
            .downcast_mut::<ComponentStorage<A>>()
            .ok_or_else(unregistered::<A>)?;
        let b_column = b_column
            .as_any()
            .downcast_ref::<ComponentStorage<B>>()
            .ok_or_else(unregistered::<B>)?;
        Ok((a_column, b_column))
    }

    /// Grows every column so slot `entity` is addressable.
    pub(crate) fn ensure_slot(&mut self, entity: EntityIndex) {
        let needed = entity.index() + 1;
        if needed <= self.slot_count {
            return;
        }
        tracing::trace!(from = self.slot_count, to = needed, "growing component columns");
        for column in &mut self.columns {
            column.grow_to(needed);
        }
        self.slot_count = needed;
    }

    /// Reserves room for `additional` more slots in every column.
    pub(crate) fn reserve(&mut self, additional: usize) {
        for column in &mut self.columns {
            column.reserve(additional);
        }
    }

    /// Resets the cell of `entity` to its default in every column.
    pub(crate) fn reset_slot(&mut self, entity: EntityIndex) {
        for column in &mut self.columns {
            column.reset(entity);
        }
    }

    /// Type names of every column, in identity order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.component_name())
    }

    /// Lengths of every column, in identity order.
    pub fn column_lens(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().map(|column| column.len())
    }
}

fn unregistered<C: Component>() -> EcsError {
    EcsError::UnregisteredComponent {
        component: type_name::<C>(),
    }
}
