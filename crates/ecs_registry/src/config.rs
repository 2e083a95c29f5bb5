//! Registry configuration.

use serde::Deserialize;

use crate::error::RegistryError;

/// Default capacity hint for the entity → components map.
pub const DEFAULT_ENTITY_CAPACITY: usize = 512;

/// Default capacity hint for the system → entities map and the updater list.
pub const DEFAULT_SYSTEM_CAPACITY: usize = 256;

/// Sizing hints for a [`Registry`](crate::Registry).
///
/// These only pre-allocate storage; the registry grows past them as needed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Expected number of live entities.
    pub entity_capacity: usize,
    /// Expected number of registered systems.
    pub system_capacity: usize,
}

impl RegistryConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Config`] if `text` is not valid JSON for this
    /// type.
    pub fn from_json(text: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Override the entity capacity hint.
    #[must_use]
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    /// Override the system capacity hint.
    #[must_use]
    pub fn with_system_capacity(mut self, capacity: usize) -> Self {
        self.system_capacity = capacity;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            entity_capacity: DEFAULT_ENTITY_CAPACITY,
            system_capacity: DEFAULT_SYSTEM_CAPACITY,
        }
    }
}
