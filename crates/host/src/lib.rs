//! Content element host.
//!
//! Registers element manifests from the plugins linked into the host and
//! renders content elements through them.

pub mod config;
pub mod error;
pub mod page;
pub mod registry;
pub mod render;

pub use config::HostConfig;
pub use error::RegistryError;
pub use page::render_elements;
pub use registry::{ElementRegistry, builtin_registry};
pub use render::RenderTreeConsumer;
