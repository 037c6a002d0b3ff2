//! # Parallel Batch Access
//!
//! The core never spawns threads or takes locks. Parallelism is the caller's,
//! and it is sound under one contract: **phase separation**.
//!
//! ```text
//! Structural phase (single thread):
//!   create / destroy / set_component / remove_component / growth
//!
//! ─── barrier: every structural call has returned ───
//!
//! Batch phase (many workers):
//!   get / set on already-allocated cells of a column,
//!   each worker owning a disjoint set of slots
//! ```
//!
//! In Rust the contract is enforced by the borrow checker. A worker only gets
//! cells through [`ComponentStorage::select_mut`](crate::ComponentStorage::select_mut)
//! or [`ComponentStorage::as_mut_slice`](crate::ComponentStorage::as_mut_slice),
//! both of which borrow the column (and so the manager) for the whole batch
//! phase. The helpers here cut those cells into disjoint runs, one per worker.
//!
//! ```rust
//! use census_core::{sync, EntityManager};
//!
//! # fn main() -> census_core::EcsResult<()> {
//! let mut manager = EntityManager::new::<(i32,)>()?;
//! for i in 0..1000 {
//!     manager.create_entity_with((i,))?;
//! }
//! let entities = manager.query::<(i32,)>()?;
//!
//! let mut cells = manager.container_mut::<i32>()?.select_mut(&entities)?;
//! std::thread::scope(|scope| {
//!     for run in sync::partition_mut(&mut cells, 2) {
//!         scope.spawn(move || {
//!             for cell in run.iter_mut() {
//!                 **cell += 1;
//!             }
//!         });
//!     }
//! });
//!
//! assert_eq!(*manager.get_component::<i32>(entities[999])?, 1000);
//! # Ok(())
//! # }
//! ```

mod partition;

pub use partition::{partition, partition_mut};
