//! # Entity Manager
//!
//! The entity table: owns every slot's signature, the free list, the live
//! counter, and the component columns. Every structural change goes through
//! here so that column writes and signature bits never drift apart.
//!
//! ## Slot states
//!
//! ```text
//! unallocated ──create──▶ live ──destroy──▶ free ──create──▶ live ...
//! ```
//!
//! - **live**: signature has at least the `EntityState` bit
//! - **free**: signature is empty, index sits on the free list
//!
//! Free slots are reused last-destroyed-first, and a reused slot starts over
//! from a signature holding only `EntityState`.

use std::any::type_name;
use std::fmt;

use super::bundle::{ComponentBundle, ComponentSet};
use super::columns::ComponentColumns;
use super::component::Component;
use super::entity::{EntityIndex, EntityState};
use super::error::{EcsError, EcsResult};
use super::registry::ComponentRegistry;
use super::signature::{ComponentId, Signature};
use super::storage::ComponentStorage;
use crate::config::ManagerConfig;

/// The entity table.
///
/// # Example
///
/// ```rust
/// use census_core::{EntityManager, EntityState};
///
/// # fn main() -> census_core::EcsResult<()> {
/// let mut manager = EntityManager::new::<(i32, f32)>()?;
///
/// let entity = manager.create_entity_with((123_i32,))?;
/// assert!(manager.has_component::<EntityState>(entity));
/// assert_eq!(*manager.get_component::<i32>(entity)?, 123);
/// assert!(!manager.has_component::<f32>(entity));
///
/// manager.destroy_entity(entity)?;
/// assert_eq!(manager.entity_count(), 0);
/// # Ok(())
/// # }
/// ```
pub struct EntityManager {
    /// One signature per allocated slot.
    signatures: Vec<Signature>,
    /// Released slots, popped last-in first-out.
    free_list: Vec<EntityIndex>,
    /// Number of live slots, maintained on every create/destroy.
    live_count: usize,
    /// Per-type columns and the registry behind them.
    columns: ComponentColumns,
    /// Bit of `EntityState`, required by every live slot.
    active: Signature,
    /// Reset column cells on destroy.
    clear_on_destroy: bool,
}

impl EntityManager {
    /// Creates a manager owning `EntityState` plus every type in `C`, with
    /// the default configuration.
    ///
    /// # Errors
    ///
    /// [`EcsError::CapacityExceeded`] if `C` names more types than fit.
    pub fn new<C: ComponentSet>() -> EcsResult<Self> {
        Self::with_config::<C>(ManagerConfig::default())
    }

    /// Creates a manager owning `EntityState` plus every type in `C`.
    ///
    /// Identities are assigned in declaration order after `EntityState`,
    /// which always takes identity 0. Naming `EntityState` in `C` again is
    /// harmless.
    ///
    /// # Errors
    ///
    /// - [`EcsError::InvalidConfig`] if the configuration is out of range
    /// - [`EcsError::CapacityExceeded`] if `C` names more types than fit
    pub fn with_config<C: ComponentSet>(config: ManagerConfig) -> EcsResult<Self> {
        config.validate()?;

        let mut columns = ComponentColumns::new(config.max_components, config.initial_capacity)?;
        let state = columns.register::<EntityState>()?;
        C::register_all(&mut columns)?;

        tracing::debug!(
            components = columns.registry().len(),
            max_components = config.max_components,
            initial_capacity = config.initial_capacity,
            "entity manager initialised"
        );

        Ok(Self {
            signatures: Vec::with_capacity(config.initial_capacity),
            free_list: Vec::new(),
            live_count: 0,
            columns,
            active: state.bit(),
            clear_on_destroy: config.clear_on_destroy,
        })
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Creates an entity carrying only `EntityState::Active`.
    ///
    /// Reuses the most recently freed slot if there is one, otherwise appends
    /// a new slot and grows every column to cover it.
    ///
    /// # Panics
    ///
    /// Panics if all `u32::MAX` slot indices are in use.
    pub fn create_entity(&mut self) -> EntityIndex {
        let entity = match self.free_list.pop() {
            Some(entity) => {
                tracing::trace!(%entity, "recycling entity slot");
                entity
            }
            None => {
                let raw = u32::try_from(self.signatures.len()).unwrap_or(u32::MAX);
                assert!(raw < u32::MAX, "entity index space exhausted");
                let entity = EntityIndex::new(raw);
                self.signatures.push(Signature::EMPTY);
                self.columns.ensure_slot(entity);
                entity
            }
        };

        self.signatures[entity.index()] = self.active;
        self.write_state(entity, EntityState::Active);
        self.live_count += 1;
        entity
    }

    /// Creates an entity and attaches every value in `bundle`.
    ///
    /// The resulting signature is `EntityState` plus the union of the bundle's
    /// types, regardless of their order in the tuple.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if a bundle type was not declared.
    /// No slot is allocated in that case.
    pub fn create_entity_with<B: ComponentBundle>(&mut self, bundle: B) -> EcsResult<EntityIndex> {
        let signature = B::signature(self.columns.registry())?;

        let entity = self.create_entity();
        if let Err(err) = bundle.write(&mut self.columns, entity) {
            self.release(entity);
            return Err(err);
        }
        self.signatures[entity.index()] |= signature;
        Ok(entity)
    }

    /// Destroys a live entity and queues its slot for reuse.
    ///
    /// The signature is cleared entirely. Column cells keep their stale
    /// values unless the manager was configured with `clear_on_destroy`.
    ///
    /// # Errors
    ///
    /// [`EcsError::NotLive`] if the slot was never allocated or is already
    /// free.
    pub fn destroy_entity(&mut self, entity: EntityIndex) -> EcsResult<()> {
        self.ensure_live(entity)?;
        self.release(entity);
        Ok(())
    }

    fn release(&mut self, entity: EntityIndex) {
        self.signatures[entity.index()].clear();
        if self.clear_on_destroy {
            self.columns.reset_slot(entity);
        }
        self.write_state(entity, EntityState::Destroyed);
        self.free_list.push(entity);
        self.live_count -= 1;
    }

    fn write_state(&mut self, entity: EntityIndex, state: EntityState) {
        let written = self
            .columns
            .get_mut::<EntityState>()
            .map(|states| states.set(entity, state));
        debug_assert!(written.is_ok(), "EntityState column is registered at construction");
    }

    fn ensure_live(&self, entity: EntityIndex) -> EcsResult<()> {
        if self.is_live(entity) {
            Ok(())
        } else {
            tracing::warn!(%entity, "rejected access through a handle that is not live");
            Err(EcsError::NotLive { entity })
        }
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.live_count
    }

    /// Number of slots ever allocated (live and free).
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.signatures.len()
    }

    /// Number of slots waiting on the free list.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Checks whether the slot currently holds a live entity.
    #[inline]
    #[must_use]
    pub fn is_live(&self, entity: EntityIndex) -> bool {
        self.signatures
            .get(entity.index())
            .is_some_and(|signature| signature.contains_all(self.active))
    }

    /// Returns the signature of an allocated slot.
    #[inline]
    #[must_use]
    pub fn signature(&self, entity: EntityIndex) -> Option<Signature> {
        self.signatures.get(entity.index()).copied()
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// Checks whether the slot's signature has the bit of `C`.
    ///
    /// Only the signature is consulted: a freed slot reports `false` for
    /// every type, and so does an unregistered `C`.
    #[inline]
    #[must_use]
    pub fn has_component<C: Component>(&self, entity: EntityIndex) -> bool {
        match (self.columns.registry().get::<C>(), self.signature(entity)) {
            (Some(id), Some(signature)) => signature.contains(id),
            _ => false,
        }
    }

    /// Reads the component `C` of a live entity.
    ///
    /// # Errors
    ///
    /// - [`EcsError::NotLive`] if the slot is not live
    /// - [`EcsError::UnregisteredComponent`] if `C` was not declared
    /// - [`EcsError::MissingComponent`] if the entity does not carry `C`
    pub fn get_component<C: Component>(&self, entity: EntityIndex) -> EcsResult<&C> {
        self.check_attached::<C>(entity)?;
        self.columns
            .get::<C>()?
            .get(entity)
            .ok_or_else(|| missing::<C>(entity))
    }

    /// Mutable form of [`EntityManager::get_component`].
    ///
    /// # Errors
    ///
    /// As [`EntityManager::get_component`].
    pub fn get_component_mut<C: Component>(&mut self, entity: EntityIndex) -> EcsResult<&mut C> {
        self.check_attached::<C>(entity)?;
        self.columns
            .get_mut::<C>()?
            .get_mut(entity)
            .ok_or_else(|| missing::<C>(entity))
    }

    fn check_attached<C: Component>(&self, entity: EntityIndex) -> EcsResult<ComponentId> {
        self.ensure_live(entity)?;
        let id = self.columns.id_of::<C>()?;
        if self.signatures[entity.index()].contains(id) {
            Ok(id)
        } else {
            Err(missing::<C>(entity))
        }
    }

    /// Adds or replaces the component `C` of a live entity.
    ///
    /// # Errors
    ///
    /// - [`EcsError::NotLive`] if the slot is not live
    /// - [`EcsError::UnregisteredComponent`] if `C` was not declared
    /// - [`EcsError::ProtectedComponent`] if `C` is `EntityState`
    pub fn set_component<C: Component>(&mut self, entity: EntityIndex, value: C) -> EcsResult<()> {
        self.ensure_live(entity)?;
        let id = self.unprotected_id::<C>()?;
        self.columns.get_mut::<C>()?.set(entity, value);
        self.signatures[entity.index()].insert(id);
        Ok(())
    }

    /// Detaches the component `C` from a live entity.
    ///
    /// Only the signature bit is cleared; the cell keeps its value until
    /// overwritten. Removing a component the entity does not carry is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// - [`EcsError::NotLive`] if the slot is not live
    /// - [`EcsError::UnregisteredComponent`] if `C` was not declared
    /// - [`EcsError::ProtectedComponent`] if `C` is `EntityState`
    pub fn remove_component<C: Component>(&mut self, entity: EntityIndex) -> EcsResult<()> {
        self.ensure_live(entity)?;
        let id = self.unprotected_id::<C>()?;
        self.signatures[entity.index()].remove(id);
        Ok(())
    }

    /// Identity of `C`, refusing `EntityState`, whose value only create and
    /// destroy may change.
    fn unprotected_id<C: Component>(&self) -> EcsResult<ComponentId> {
        let id = self.columns.id_of::<C>()?;
        if id.bit() == self.active {
            return Err(EcsError::ProtectedComponent {
                component: type_name::<C>(),
            });
        }
        Ok(id)
    }

    // =========================================================================
    // Bulk access
    // =========================================================================

    /// Returns the raw column for `C`.
    ///
    /// Reads bypass signature checks; only touch slots known to carry `C`,
    /// typically the result of a query.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was not declared.
    pub fn container<C: Component>(&self) -> EcsResult<&ComponentStorage<C>> {
        self.columns.get::<C>()
    }

    /// Returns the raw column for `C` mutably.
    ///
    /// Writes through the column never touch signatures. Writing a slot that
    /// does not carry `C` stores a value no one will read.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was not declared.
    pub fn container_mut<C: Component>(&mut self) -> EcsResult<&mut ComponentStorage<C>> {
        self.columns.get_mut::<C>()
    }

    /// Returns the column for `A` mutably and the column for `B` shared, for
    /// batch updates that read one type and write another.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnregisteredComponent`] if either type was not declared
    /// - [`EcsError::AliasedColumns`] if `A` and `B` are the same type
    pub fn container_pair_mut<A: Component, B: Component>(
        &mut self,
    ) -> EcsResult<(&mut ComponentStorage<A>, &ComponentStorage<B>)> {
        self.columns.pair_mut::<A, B>()
    }

    /// Reserves room for `additional` more slots in the table and every column.
    pub fn reserve(&mut self, additional: usize) {
        self.signatures.reserve(additional);
        self.columns.reserve(additional);
    }

    // =========================================================================
    // Identities
    // =========================================================================

    /// The registry of this manager's component types.
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        self.columns.registry()
    }

    /// Returns the identity of `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was not declared.
    pub fn component_id<C: Component>(&self) -> EcsResult<ComponentId> {
        self.columns.id_of::<C>()
    }

    /// Returns the single-bit signature of `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was not declared.
    pub fn bit<C: Component>(&self) -> EcsResult<Signature> {
        self.columns.bit::<C>()
    }

    /// Returns the union of the bits of every type in `C`, for use as a
    /// query filter.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if any type was not declared.
    pub fn signature_of<C: ComponentSet>(&self) -> EcsResult<Signature> {
        C::signature(self.columns.registry())
    }

    /// The bit every live slot carries.
    #[inline]
    pub(crate) fn active_bit(&self) -> Signature {
        self.active
    }

    /// Every slot's signature, indexed by slot.
    #[inline]
    pub(crate) fn signatures(&self) -> &[Signature] {
        &self.signatures
    }
}

fn missing<C: Component>(entity: EntityIndex) -> EcsError {
    EcsError::MissingComponent {
        entity,
        component: type_name::<C>(),
    }
}

impl fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityManager")
            .field("live", &self.live_count)
            .field("slots", &self.signatures.len())
            .field("free", &self.free_list.len())
            .field("components", &self.columns.column_names().collect::<Vec<_>>())
            .finish()
    }
}
