//! # ECS Error Types
//!
//! All errors that can occur while configuring or mutating an entity table.
//!
//! Every variant is a programming-contract violation reported synchronously to
//! the caller. None of them are transient, so none carry retry semantics, and a
//! call that fails leaves the manager exactly as it was before the call.

use thiserror::Error;

use super::entity::EntityIndex;

/// Errors that can occur in the entity/component store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// More distinct component types were registered than the signature can hold.
    #[error("component capacity exceeded: tried to register type #{requested}, maximum is {max}")]
    CapacityExceeded {
        /// One-based ordinal of the registration that overflowed.
        requested: usize,
        /// The configured maximum number of component types.
        max: usize,
    },

    /// A structural or typed access was made through a handle that is not live.
    #[error("entity {entity} is not live")]
    NotLive {
        /// The offending handle.
        entity: EntityIndex,
    },

    /// The entity is live but does not carry the requested component.
    #[error("entity {entity} has no `{component}` component")]
    MissingComponent {
        /// The entity that was queried.
        entity: EntityIndex,
        /// Type name of the missing component.
        component: &'static str,
    },

    /// The component type was never declared when the manager was built.
    #[error("component `{component}` is not registered with this manager")]
    UnregisteredComponent {
        /// Type name of the unknown component.
        component: &'static str,
    },

    /// The component is managed by the table itself and cannot be detached.
    #[error("`{component}` cannot be removed; destroy the entity instead")]
    ProtectedComponent {
        /// Type name of the protected component.
        component: &'static str,
    },

    /// Two views of the same column were requested where one is mutable.
    #[error("cannot borrow the `{component}` column mutably and shared at the same time")]
    AliasedColumns {
        /// Type name of the column requested twice.
        component: &'static str,
    },

    /// A slot selection for bulk mutable access was malformed.
    #[error("invalid slot selection: {reason}")]
    InvalidSelection {
        /// What was wrong with the selection.
        reason: String,
    },

    /// Configuration values are out of range or failed to parse.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(String),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
