//! # Entity Component Store
//!
//! Entities, typed component columns, and signature queries.
//!
//! ## Design Philosophy
//!
//! - An entity is only a recyclable slot index
//! - Every component type gets its own dense column indexed by slot
//! - A per-slot bitmask records which columns hold live data
//! - Queries are a linear scan of bitmasks, in slot order
//! - Component identities are declared up front, per manager

mod bundle;
mod columns;
mod component;
mod entity;
mod error;
mod manager;
mod query;
mod registry;
mod signature;
mod storage;

pub use bundle::{ComponentBundle, ComponentSet};
pub use columns::ComponentColumns;
pub use component::Component;
pub use entity::{EntityIndex, EntityState};
pub use error::{EcsError, EcsResult};
pub use manager::EntityManager;
pub use registry::{ComponentDesc, ComponentRegistry};
pub use signature::{ComponentId, Signature, SignatureIter, MAX_COMPONENT_COUNT};
pub use storage::ComponentStorage;
