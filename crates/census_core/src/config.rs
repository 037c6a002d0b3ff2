//! # Manager Configuration
//!
//! Tunables for an [`EntityManager`](crate::EntityManager), loaded once at
//! startup from TOML or built in code.
//!
//! ```toml
//! max_components = 16
//! initial_capacity = 100000
//! clear_on_destroy = false
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::ecs::{EcsError, EcsResult, MAX_COMPONENT_COUNT};

/// Configuration for an entity manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// Maximum number of component types, `EntityState` included.
    /// Must be in `1..=MAX_COMPONENT_COUNT`.
    pub max_components: usize,
    /// Slots reserved up front in the table and in every column.
    pub initial_capacity: usize,
    /// Reset every column cell of a slot to its default on destroy.
    /// When `false` the cells keep their stale values until overwritten.
    pub clear_on_destroy: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_components: MAX_COMPONENT_COUNT,
            initial_capacity: 0,
            clear_on_destroy: false,
        }
    }
}

impl ManagerConfig {
    /// Parses a configuration from TOML text and validates it.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidConfig`] on malformed TOML, unknown keys, or
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> EcsResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| EcsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// [`EcsError::ConfigIo`] if the file cannot be read, otherwise as
    /// [`ManagerConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> EcsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EcsError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidConfig`] if `max_components` is zero or wider than
    /// a signature.
    pub fn validate(&self) -> EcsResult<()> {
        if self.max_components == 0 || self.max_components > MAX_COMPONENT_COUNT {
            return Err(EcsError::InvalidConfig(format!(
                "max_components must be in 1..={MAX_COMPONENT_COUNT}, got {}",
                self.max_components
            )));
        }
        if u32::try_from(self.initial_capacity).is_err() {
            return Err(EcsError::InvalidConfig(format!(
                "initial_capacity {} exceeds the entity index range",
                self.initial_capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ManagerConfig::default());
        assert_eq!(config.max_components, 64);
        assert!(!config.clear_on_destroy);
    }

    #[test]
    fn test_parse() {
        let config = ManagerConfig::from_toml_str(
            "max_components = 8\ninitial_capacity = 1000\nclear_on_destroy = true\n",
        )
        .unwrap();
        assert_eq!(config.max_components, 8);
        assert_eq!(config.initial_capacity, 1000);
        assert!(config.clear_on_destroy);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            ManagerConfig::from_toml_str("max_components = 0"),
            Err(EcsError::InvalidConfig(_))
        ));
        assert!(matches!(
            ManagerConfig::from_toml_str("max_components = 65"),
            Err(EcsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            ManagerConfig::from_toml_str("max_component = 8"),
            Err(EcsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ManagerConfig::load("/nonexistent/census.toml"),
            Err(EcsError::ConfigIo(_))
        ));
    }
}
