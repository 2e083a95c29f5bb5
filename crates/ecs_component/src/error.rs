//! Component-layer error types.

/// Errors raised when resolving components.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// No component of the requested payload type is attached.
    #[error("missing required component `{type_name}`")]
    Missing {
        /// Fully qualified name of the requested payload type.
        type_name: &'static str,
    },
}
