//! # CENSUS Core
//!
//! In-memory entity/component store designed for:
//! - Creating and destroying large numbers of entities cheaply
//! - O(1) typed access to component data by entity index
//! - Repeatedly selecting entities by the shape of their data
//! - Caller-driven parallel batch updates over disjoint slots
//!
//! ## Architecture Rules
//!
//! 1. **Entities are slot indices** - recycled last-destroyed-first
//! 2. **One dense column per component type** - indexed directly by slot
//! 3. **Signatures are bitmasks** - one per slot, owned by the manager
//! 4. **Phase separation** - structural changes never overlap batch work
//!
//! ## Example
//!
//! ```rust
//! use census_core::EntityManager;
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! struct Position { x: f32, y: f32, z: f32 }
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! struct Velocity { x: f32, y: f32, z: f32 }
//!
//! # fn main() -> census_core::EcsResult<()> {
//! let mut manager = EntityManager::new::<(Position, Velocity)>()?;
//! let entity = manager.create_entity_with((
//!     Position { x: 0.0, y: 0.0, z: 0.0 },
//!     Velocity { x: 1.0, y: 0.0, z: 0.0 },
//! ))?;
//!
//! for moving in manager.query::<(Position, Velocity)>()? {
//!     let (positions, velocities) = manager.container_pair_mut::<Position, Velocity>()?;
//!     if let (Some(p), Some(v)) = (positions.get_mut(moving), velocities.get(moving)) {
//!         p.x += v.x;
//!     }
//! }
//!
//! assert_eq!(manager.get_component::<Position>(entity)?.x, 1.0);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod sync;

pub use config::ManagerConfig;
pub use ecs::{
    Component, ComponentBundle, ComponentColumns, ComponentDesc, ComponentId, ComponentRegistry,
    ComponentSet, ComponentStorage, EcsError, EcsResult, EntityIndex, EntityManager, EntityState,
    Signature, SignatureIter, MAX_COMPONENT_COUNT,
};
