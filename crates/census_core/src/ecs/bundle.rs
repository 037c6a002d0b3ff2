//! # Component Sets and Bundles
//!
//! Tuples of component *types* ([`ComponentSet`]) declare which columns a
//! manager owns and build query filters. Tuples of component *values*
//! ([`ComponentBundle`]) attach initial data when an entity is created.
//!
//! Both are implemented for tuples of one to eight components:
//!
//! ```rust,ignore
//! let mut manager = EntityManager::new::<(i32, f32, Vec<i32>)>()?;
//! let entity = manager.create_entity_with((123, vec![1, 10]))?;
//! let filter = manager.signature_of::<(i32, Vec<i32>)>()?;
//! ```

use super::columns::ComponentColumns;
use super::component::Component;
use super::entity::EntityIndex;
use super::error::EcsResult;
use super::registry::ComponentRegistry;
use super::signature::Signature;

/// An ordered list of component types.
pub trait ComponentSet {
    /// Registers every type in order, creating its column.
    ///
    /// # Errors
    ///
    /// Fails with [`EcsError::CapacityExceeded`](super::error::EcsError::CapacityExceeded)
    /// once the registry is full.
    fn register_all(columns: &mut ComponentColumns) -> EcsResult<()>;

    /// Union of the bits of every type in the list.
    ///
    /// # Errors
    ///
    /// Fails with [`EcsError::UnregisteredComponent`](super::error::EcsError::UnregisteredComponent)
    /// if any type is unknown to `registry`.
    fn signature(registry: &ComponentRegistry) -> EcsResult<Signature>;
}

/// A tuple of component values written together into one entity slot.
pub trait ComponentBundle: ComponentSet + Sized {
    /// Writes every value into its column at `entity`.
    ///
    /// Callers check [`ComponentSet::signature`] first, so by the time this
    /// runs every column is known to exist.
    ///
    /// # Errors
    ///
    /// Fails with [`EcsError::UnregisteredComponent`](super::error::EcsError::UnregisteredComponent)
    /// if a column is missing.
    fn write(self, columns: &mut ComponentColumns, entity: EntityIndex) -> EcsResult<()>;
}

macro_rules! impl_component_tuple {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn register_all(columns: &mut ComponentColumns) -> EcsResult<()> {
                $( columns.register::<$name>()?; )+
                Ok(())
            }

            fn signature(registry: &ComponentRegistry) -> EcsResult<Signature> {
                Ok(Signature::EMPTY $( | registry.bit::<$name>()? )+)
            }
        }

        impl<$($name: Component),+> ComponentBundle for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write(self, columns: &mut ComponentColumns, entity: EntityIndex) -> EcsResult<()> {
                let ($($name,)+) = self;
                $( columns.get_mut::<$name>()?.set(entity, $name); )+
                Ok(())
            }
        }
    };
}

impl_component_tuple!(A);
impl_component_tuple!(A, B);
impl_component_tuple!(A, B, C);
impl_component_tuple!(A, B, C, D);
impl_component_tuple!(A, B, C, D, E);
impl_component_tuple!(A, B, C, D, E, F);
impl_component_tuple!(A, B, C, D, E, F, G);
impl_component_tuple!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::error::EcsError;

    #[test]
    fn test_register_all_in_order() {
        let mut columns = ComponentColumns::new(8, 0).unwrap();
        <(u8, u16, u32)>::register_all(&mut columns).unwrap();

        let registry = columns.registry();
        assert_eq!(registry.id_of::<u8>().unwrap().index(), 0);
        assert_eq!(registry.id_of::<u16>().unwrap().index(), 1);
        assert_eq!(registry.id_of::<u32>().unwrap().index(), 2);
    }

    #[test]
    fn test_signature_is_order_independent() {
        let mut columns = ComponentColumns::new(8, 0).unwrap();
        <(u8, u16, u32)>::register_all(&mut columns).unwrap();

        let registry = columns.registry();
        assert_eq!(
            <(u32, u8)>::signature(registry).unwrap(),
            <(u8, u32)>::signature(registry).unwrap()
        );
        assert_eq!(<(u8, u16, u32)>::signature(registry).unwrap().len(), 3);
    }

    #[test]
    fn test_signature_unknown_type() {
        let mut columns = ComponentColumns::new(8, 0).unwrap();
        <(u8,)>::register_all(&mut columns).unwrap();
        assert!(matches!(
            <(u8, i64)>::signature(columns.registry()),
            Err(EcsError::UnregisteredComponent { component: "i64" })
        ));
    }

    #[test]
    fn test_bundle_write() {
        let mut columns = ComponentColumns::new(8, 0).unwrap();
        <(i32, String)>::register_all(&mut columns).unwrap();
        let entity = EntityIndex::new(2);
        columns.ensure_slot(entity);

        (7, String::from("seven")).write(&mut columns, entity).unwrap();

        assert_eq!(columns.get::<i32>().unwrap().get(entity), Some(&7));
        assert_eq!(
            columns.get::<String>().unwrap().get(entity).map(String::as_str),
            Some("seven")
        );
    }

    #[test]
    fn test_register_all_capacity() {
        let mut columns = ComponentColumns::new(2, 0).unwrap();
        assert!(matches!(
            <(u8, u16, u32)>::register_all(&mut columns),
            Err(EcsError::CapacityExceeded { requested: 3, max: 2 })
        ));
    }
}
