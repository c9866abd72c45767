//! Element registry errors with actionable messages.

use thiserror::Error;

/// Errors raised while registering or looking up element types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two manifests claim the same type tag.
    #[error("element type '{element_type}' is already registered by renderer '{renderer}'")]
    DuplicateType {
        element_type: String,
        renderer: String,
    },

    /// The type is listed in CE_DISABLED_ELEMENTS.
    #[error("element type '{element_type}' is disabled (listed in CE_DISABLED_ELEMENTS)")]
    Disabled { element_type: String },

    /// No manifest is registered for the type.
    #[error("element type '{element_type}' is not registered. Registered types: {registered}")]
    UnknownType {
        element_type: String,
        registered: String,
    },
}
