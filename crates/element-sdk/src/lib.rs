//! Content Element SDK
//!
//! Types and traits shared by content element plugins and the host that
//! mounts them. A plugin pairs an upstream [`ElementDescriptor`] with a
//! [`RenderCapability`] via [`compose`], and the host registers the
//! resulting [`ElementManifest`].

pub mod descriptor;
pub mod manifest;
pub mod render;
pub mod types;

pub use descriptor::ElementDescriptor;
pub use manifest::{DISPLAY_FIELD, ElementManifest, compose};
pub use render::{RenderCapability, RenderElement};
pub use types::{ContentElement, RenderContext, UserState};

pub mod prelude {
    pub use crate::descriptor::ElementDescriptor;
    pub use crate::manifest::{DISPLAY_FIELD, ElementManifest, compose};
    pub use crate::render::{self, RenderCapability, RenderElement};
    pub use crate::types::*;
}
