//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// Directory of Tera templates overriding inline element rendering
    /// (CE_TEMPLATES_DIR, optional).
    pub templates_dir: Option<PathBuf>,

    /// Element type tags the host refuses to register
    /// (CE_DISABLED_ELEMENTS, comma-separated).
    pub disabled_elements: Vec<String>,

    /// Render elements without interactive controls by default
    /// (CE_READONLY, default: false).
    pub readonly: bool,
}

impl HostConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let templates_dir = var("CE_TEMPLATES_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let disabled_elements = var("CE_DISABLED_ELEMENTS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let readonly = match var("CE_READONLY") {
            None => false,
            Some(v) => match v.trim().to_lowercase().as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                other => bail!("CE_READONLY must be true or false, got '{other}'"),
            },
        };

        Ok(Self {
            templates_dir,
            disabled_elements,
            readonly,
        })
    }

    pub fn is_disabled(&self, element_type: &str) -> bool {
        self.disabled_elements.iter().any(|t| t == element_type)
    }
}
