//! Element type registry.
//!
//! Holds one manifest per element type tag. Built once at startup from the
//! plugins linked into the host, then shared read-only; manifests and their
//! renderers are `Send + Sync`, so a registry behind an `Arc` can serve any
//! number of sessions.

use std::collections::{HashMap, HashSet};

use ce_sdk::{ContentElement, ElementManifest, RenderContext, RenderElement};
use tracing::{debug, info};

use crate::config::HostConfig;
use crate::error::RegistryError;

/// Registry of element manifests, keyed by type tag.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    manifests: HashMap<String, ElementManifest>,
    disabled: HashSet<String>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that refuses the given type tags.
    pub fn with_disabled<I, S>(disabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            manifests: HashMap::new(),
            disabled: disabled.into_iter().map(Into::into).collect(),
        }
    }

    /// Register a manifest under its type tag.
    pub fn register(&mut self, manifest: ElementManifest) -> Result<(), RegistryError> {
        let element_type = manifest.type_tag().to_string();

        if self.disabled.contains(&element_type) {
            return Err(RegistryError::Disabled { element_type });
        }

        if let Some(existing) = self.manifests.get(&element_type) {
            return Err(RegistryError::DuplicateType {
                element_type,
                renderer: existing.display().name().to_string(),
            });
        }

        info!(
            element_type = %element_type,
            renderer = manifest.display().name(),
            "registered element type"
        );
        self.manifests.insert(element_type, manifest);
        Ok(())
    }

    /// Look up a manifest by type tag.
    pub fn get(&self, element_type: &str) -> Option<&ElementManifest> {
        self.manifests.get(element_type)
    }

    /// Look up a manifest, failing with the list of known types.
    pub fn require(&self, element_type: &str) -> Result<&ElementManifest, RegistryError> {
        self.get(element_type)
            .ok_or_else(|| RegistryError::UnknownType {
                element_type: element_type.to_string(),
                registered: self.type_names().join(", "),
            })
    }

    /// Check whether a type tag is registered.
    pub fn contains(&self, element_type: &str) -> bool {
        self.manifests.contains_key(element_type)
    }

    /// Return the number of registered element types.
    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// All registered type tags, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.manifests.keys().cloned().collect();
        names.sort();
        names
    }

    /// Render an element with the renderer registered for its type.
    ///
    /// Returns `None` for unregistered types.
    pub fn render(&self, element: &ContentElement, ctx: &RenderContext) -> Option<RenderElement> {
        let Some(manifest) = self.get(&element.element_type) else {
            debug!(element_type = %element.element_type, "no manifest for element type");
            return None;
        };
        Some(manifest.render(element, ctx))
    }
}

/// Build a registry holding every element plugin linked into the host.
///
/// Types listed in `config.disabled_elements` are skipped.
pub fn builtin_registry(config: &HostConfig) -> Result<ElementRegistry, RegistryError> {
    let mut registry = ElementRegistry::with_disabled(config.disabled_elements.iter().cloned());

    for manifest in [ce_fill_blank_display::manifest()] {
        match registry.register(manifest) {
            Ok(()) => {}
            Err(RegistryError::Disabled { element_type }) => {
                info!(element_type = %element_type, "skipping disabled element type");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(registry)
}
