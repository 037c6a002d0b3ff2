//! # Component Trait
//!
//! Components are plain data. Any owned, thread-safe value type with a
//! default value can be stored in a column.

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Default`: freshly grown column cells are filled with the default value
/// - `Clone`: cells can be reset and copied out in bulk
/// - `Send + Sync`: columns can be shared with worker threads during a
///   parallel phase
///
/// Every type meeting these bounds is a component; there is nothing to
/// implement by hand. Whether a particular manager accepts it depends only on
/// whether it was declared when the manager was built.
///
/// # Example
///
/// ```rust
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// struct Position {
///     x: f32,
///     y: f32,
///     z: f32,
/// }
///
/// fn assert_component<C: census_core::Component>() {}
/// assert_component::<Position>();
/// assert_component::<Vec<i32>>();
/// ```
pub trait Component: Clone + Default + Send + Sync + 'static {}

impl<T: Clone + Default + Send + Sync + 'static> Component for T {}
