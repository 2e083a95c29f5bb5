//! Registry error types.

use ecs_component::EntityId;
use ecs_system::SystemId;

/// Errors surfaced by the registry and its frame driver.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// An updater returned an error. The rest of the frame's updates were
    /// skipped.
    #[error("updater {system} failed on {entity}: {source}")]
    Update {
        /// The failing updater.
        system: SystemId,
        /// The entity it was updating.
        entity: EntityId,
        /// The error returned by the updater, unchanged.
        #[source]
        source: anyhow::Error,
    },

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl RegistryError {
    /// Consume the error, returning the updater's own error if this is an
    /// [`RegistryError::Update`].
    #[must_use]
    pub fn into_update_source(self) -> Option<anyhow::Error> {
        match self {
            Self::Update { source, .. } => Some(source),
            Self::Config(_) => None,
        }
    }
}
