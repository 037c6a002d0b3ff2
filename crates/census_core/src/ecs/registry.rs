//! # Component Registry
//!
//! Assigns each component type a compact [`ComponentId`] in declaration
//! order. The registry belongs to a single manager; two managers in the same
//! process never share identities, so declaring types in a different order
//! elsewhere has no effect here.
//!
//! ## Invariants
//! - Identities are dense, start at 0 and follow first-registration order.
//! - Re-registering a type returns its existing identity.
//! - An identity is never revoked or reassigned.
//! - At most `max` types are registered; the next one fails with
//!   [`EcsError::CapacityExceeded`] and leaves the registry unchanged.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::component::Component;
use super::error::{EcsError, EcsResult};
use super::signature::{ComponentId, Signature, MAX_COMPONENT_COUNT};

/// Metadata recorded for each registered component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDesc {
    id: ComponentId,
    name: &'static str,
    type_id: TypeId,
    size: usize,
}

impl ComponentDesc {
    /// The identity assigned to the type.
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The Rust type name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The `TypeId` of the component.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// `size_of` the component, in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Mapping from component types to identities, scoped to one manager.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    by_type: HashMap<TypeId, ComponentId>,
    descs: Vec<ComponentDesc>,
    max: usize,
}

impl ComponentRegistry {
    /// Creates an empty registry that accepts up to `max` component types.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidConfig`] if `max` is zero or wider than a
    /// [`Signature`].
    pub fn new(max: usize) -> EcsResult<Self> {
        if max == 0 || max > MAX_COMPONENT_COUNT {
            return Err(EcsError::InvalidConfig(format!(
                "max_components must be in 1..={MAX_COMPONENT_COUNT}, got {max}"
            )));
        }
        Ok(Self {
            by_type: HashMap::with_capacity(max),
            descs: Vec::with_capacity(max),
            max,
        })
    }

    /// Registers `C`, returning its identity.
    ///
    /// Idempotent: registering the same type again returns the identity it
    /// already has.
    ///
    /// # Errors
    ///
    /// [`EcsError::CapacityExceeded`] if `C` is new and the registry is full.
    pub fn register<C: Component>(&mut self) -> EcsResult<ComponentId> {
        let type_id = TypeId::of::<C>();
        if let Some(&id) = self.by_type.get(&type_id) {
            return Ok(id);
        }

        let next = self.descs.len();
        if next >= self.max {
            return Err(EcsError::CapacityExceeded {
                requested: next + 1,
                max: self.max,
            });
        }

        // next < max <= 64, so it fits in a u8
        #[allow(clippy::cast_possible_truncation)]
        let id = ComponentId::new(next as u8);
        self.by_type.insert(type_id, id);
        self.descs.push(ComponentDesc {
            id,
            name: type_name::<C>(),
            type_id,
            size: std::mem::size_of::<C>(),
        });
        Ok(id)
    }

    /// Looks up the identity of `C`, if registered.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self) -> Option<ComponentId> {
        self.by_type.get(&TypeId::of::<C>()).copied()
    }

    /// Returns the identity of `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was never registered.
    #[inline]
    pub fn id_of<C: Component>(&self) -> EcsResult<ComponentId> {
        self.get::<C>().ok_or(EcsError::UnregisteredComponent {
            component: type_name::<C>(),
        })
    }

    /// Returns the single-bit signature of `C`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `C` was never registered.
    #[inline]
    pub fn bit<C: Component>(&self) -> EcsResult<Signature> {
        self.id_of::<C>().map(ComponentId::bit)
    }

    /// Returns the metadata for an identity.
    #[must_use]
    pub fn desc(&self, id: ComponentId) -> Option<&ComponentDesc> {
        self.descs.get(id.index())
    }

    /// Iterates the registered types in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDesc> {
        self.descs.iter()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descs.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descs.is_empty()
    }

    /// The maximum number of types this registry accepts.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Base {
        _value: i32,
    }

    #[derive(Clone, Default)]
    struct Derived {
        _base: Base,
        _other: i32,
    }

    #[test]
    fn test_first_use_order() {
        let mut registry = ComponentRegistry::new(8).unwrap();
        assert_eq!(registry.register::<i32>().unwrap().index(), 0);
        assert_eq!(registry.register::<f32>().unwrap().index(), 1);
        assert_eq!(registry.register::<Vec<i32>>().unwrap().index(), 2);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = ComponentRegistry::new(8).unwrap();
        let first = registry.register::<i32>().unwrap();
        registry.register::<u8>().unwrap();
        assert_eq!(registry.register::<i32>().unwrap(), first);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut registry = ComponentRegistry::new(2).unwrap();
        registry.register::<i32>().unwrap();
        registry.register::<f32>().unwrap();

        let err = registry.register::<u8>().unwrap_err();
        assert_eq!(err, EcsError::CapacityExceeded { requested: 3, max: 2 });
        assert_eq!(registry.len(), 2);
        assert!(registry.get::<u8>().is_none());
    }

    #[test]
    fn test_invalid_max() {
        assert!(ComponentRegistry::new(0).is_err());
        assert!(ComponentRegistry::new(MAX_COMPONENT_COUNT + 1).is_err());
        assert!(ComponentRegistry::new(MAX_COMPONENT_COUNT).is_ok());
    }

    #[test]
    fn test_related_types_get_distinct_ids() {
        let mut registry = ComponentRegistry::new(4).unwrap();
        let base = registry.register::<Base>().unwrap();
        let derived = registry.register::<Derived>().unwrap();
        assert_ne!(base, derived);
        assert_ne!(registry.bit::<Base>().unwrap(), registry.bit::<Derived>().unwrap());
    }

    #[test]
    fn test_unregistered_lookup() {
        let registry = ComponentRegistry::new(4).unwrap();
        assert!(matches!(
            registry.id_of::<i64>(),
            Err(EcsError::UnregisteredComponent { component: "i64" })
        ));
    }

    #[test]
    fn test_desc_metadata() {
        let mut registry = ComponentRegistry::new(4).unwrap();
        let id = registry.register::<u64>().unwrap();
        let desc = registry.desc(id).unwrap();
        assert_eq!(desc.name(), "u64");
        assert_eq!(desc.size(), 8);
        assert_eq!(desc.type_id(), TypeId::of::<u64>());
    }
}
