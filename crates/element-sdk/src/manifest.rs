//! Element manifests.
//!
//! A manifest is what the host registers for an element type: the upstream
//! descriptor with a render capability bound under [`DISPLAY_FIELD`].
//! Manifests are built once per process by the plugin's factory and are
//! immutable afterwards.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::descriptor::ElementDescriptor;
use crate::render::{RenderCapability, RenderElement};
use crate::types::{ContentElement, RenderContext};

/// Well-known field the render capability is bound under.
pub const DISPLAY_FIELD: &str = "Display";

/// An element descriptor merged with its render capability.
#[derive(Clone)]
pub struct ElementManifest {
    descriptor: ElementDescriptor,
    display: Arc<dyn RenderCapability>,
}

/// Merge `base` with `display`.
///
/// Every descriptor field is kept as-is. A `Display` field already present
/// on the descriptor is replaced by `display`. Composition never fails and
/// performs no validation of the descriptor.
pub fn compose(base: ElementDescriptor, display: Arc<dyn RenderCapability>) -> ElementManifest {
    let mut descriptor = base;
    if descriptor.extra.remove(DISPLAY_FIELD).is_some() {
        debug!(
            element_type = %descriptor.type_tag,
            "descriptor already carried a Display field, overwriting"
        );
    }
    let renderer = display.name();
    debug!(
        element_type = %descriptor.type_tag,
        renderer = %renderer,
        "composed element manifest"
    );
    ElementManifest {
        descriptor,
        display,
    }
}

impl ElementManifest {
    /// The descriptor fields, without the render capability.
    pub fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    /// The bound render capability (shared, not copied).
    pub fn display(&self) -> &Arc<dyn RenderCapability> {
        &self.display
    }

    pub fn type_tag(&self) -> &str {
        &self.descriptor.type_tag
    }

    /// The descriptor's display name, if it published one.
    pub fn name(&self) -> Option<&str> {
        self.descriptor.name.as_deref()
    }

    /// Render an element through the bound capability.
    pub fn render(&self, element: &ContentElement, ctx: &RenderContext) -> RenderElement {
        self.display.render(element, ctx)
    }

    /// Re-bind this manifest's descriptor to a different capability.
    pub fn with_display(&self, display: Arc<dyn RenderCapability>) -> ElementManifest {
        compose(self.descriptor.clone(), display)
    }

    /// All fields as a flat JSON object: descriptor fields plus `Display`.
    pub fn fields(&self) -> serde_json::Map<String, Value> {
        let mut fields = self.descriptor.fields();
        fields.insert(
            DISPLAY_FIELD.into(),
            Value::String(self.display.name().to_string()),
        );
        fields
    }
}

impl PartialEq for ElementManifest {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && Arc::ptr_eq(&self.display, &other.display)
    }
}

impl fmt::Debug for ElementManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementManifest")
            .field("descriptor", &self.descriptor)
            .field("display", &self.display.name())
            .finish()
    }
}

impl Serialize for ElementManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields().serialize(serializer)
    }
}
