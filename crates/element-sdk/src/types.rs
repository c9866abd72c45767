//! Core types exchanged between the host and element renderers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A content element instance as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElement {
    /// Unique identifier (UUIDv7, time-sortable).
    pub id: Uuid,

    /// Type tag matching a registered manifest (e.g. "FILL_BLANK").
    #[serde(rename = "type")]
    pub element_type: String,

    /// Element data; its shape is owned by the element type.
    #[serde(default)]
    pub data: Value,
}

impl ContentElement {
    pub fn new(element_type: impl Into<String>, data: Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            element_type: element_type.into(),
            data,
        }
    }
}

/// Per-invocation context a renderer receives from the host.
///
/// Renderers keep no state between calls; everything that varies per
/// authoring session travels here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderContext {
    /// Render without interactive controls.
    #[serde(default)]
    pub readonly: bool,

    /// The learner's interaction with this element, if any.
    #[serde(default)]
    pub user_state: Option<UserState>,
}

impl RenderContext {
    pub fn readonly() -> Self {
        Self {
            readonly: true,
            user_state: None,
        }
    }

    pub fn with_user_state(mut self, user_state: UserState) -> Self {
        self.user_state = Some(user_state);
        self
    }

    /// Whether the learner has submitted an answer.
    pub fn is_submitted(&self) -> bool {
        self.user_state.as_ref().is_some_and(|s| s.submitted)
    }

    /// Response the learner entered at `index`, if any.
    pub fn response(&self, index: usize) -> Option<&str> {
        self.user_state
            .as_ref()
            .and_then(|s| s.responses.get(index))
            .map(String::as_str)
    }
}

/// Learner responses for an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    #[serde(default)]
    pub responses: Vec<String>,
    #[serde(default)]
    pub submitted: bool,
}

impl UserState {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            submitted: false,
        }
    }

    pub fn submitted(mut self) -> Self {
        self.submitted = true;
        self
    }
}
