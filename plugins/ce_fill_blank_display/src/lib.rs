//! Fill-in-the-blank element plugin.
//!
//! Binds the upstream `FILL_BLANK` descriptor to the [`Display`] renderer.
//! Hosts register [`manifest()`]; callers that only need the renderer (to
//! embed it in another manifest, or to test it alone) use [`display()`].

mod display;

use std::sync::{Arc, LazyLock};

use ce_sdk::{ElementManifest, RenderCapability, compose};

pub use display::Display;

// One renderer per process, shared by every manifest built from it.
static DISPLAY: LazyLock<Arc<dyn RenderCapability>> = LazyLock::new(|| Arc::new(Display));

/// The fill-in-the-blank render capability.
pub fn display() -> Arc<dyn RenderCapability> {
    Arc::clone(&DISPLAY)
}

/// The composed fill-in-the-blank manifest.
///
/// Call once at registration time; the result is immutable.
pub fn manifest() -> ElementManifest {
    compose(ce_fill_blank_manifest::manifest(), display())
}
