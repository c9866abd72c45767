//! Content element test utilities.
//!
//! Fixtures, mock renderers, and assertion helpers shared by the plugin
//! and host test suites.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ce_sdk::render;
use ce_sdk::{ContentElement, ElementDescriptor, RenderCapability, RenderContext, RenderElement};
use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

/// Create a test element with empty data.
pub fn test_element(element_type: &str) -> TestElement {
    TestElement {
        id: Uuid::now_v7(),
        element_type: element_type.to_string(),
        data: json!({}),
    }
}

/// A test element builder for creating fixtures.
#[derive(Debug, Clone)]
pub struct TestElement {
    pub id: Uuid,
    pub element_type: String,
    pub data: JsonValue,
}

impl TestElement {
    /// Set a custom ID.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Replace all data.
    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = data;
        self
    }

    /// Set a single data field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        if let Some(obj) = self.data.as_object_mut() {
            obj.insert(name.to_string(), value);
        }
        self
    }

    pub fn build(self) -> ContentElement {
        ContentElement {
            id: self.id,
            element_type: self.element_type,
            data: self.data,
        }
    }
}

/// A fill-in-the-blank element with two blanks.
pub fn fill_blank_element() -> ContentElement {
    test_element("FILL_BLANK")
        .with_field(
            "question",
            json!("The capital of France is @blank and of Italy is @blank."),
        )
        .with_field("correct", json!([["Paris"], ["Rome", "Roma"]]))
        .with_field(
            "feedback",
            json!({ "correct": "Well done!", "incorrect": "Not quite." }),
        )
        .build()
}

/// A minimal descriptor for an arbitrary element type.
pub fn test_descriptor(type_tag: &str) -> ElementDescriptor {
    ElementDescriptor::new(type_tag)
        .name(format!("Test {type_tag}"))
        .schema(json!({ "type": "object" }))
        .init_state(json!({}))
}

/// Renderer that records every element it renders.
///
/// Renders a `<p>` carrying its label so tests can tell renderers apart.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    label: String,
    calls: AtomicUsize,
    seen: Mutex<Vec<Uuid>>,
}

impl RecordingRenderer {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `render` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// IDs of rendered elements, in call order.
    pub fn seen(&self) -> Vec<Uuid> {
        self.seen.lock().unwrap().clone()
    }
}

impl RenderCapability for RecordingRenderer {
    fn render(&self, element: &ContentElement, _ctx: &RenderContext) -> RenderElement {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(element.id);
        render::markup("p", &self.label)
            .class("recorded")
            .attr("data-element-id", &element.id.to_string())
            .build()
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Assertion helpers for manifests, render trees, and markup.
pub mod assert {
    use ce_sdk::{ElementManifest, RenderElement};

    /// Assert that a serialized manifest has exactly the given top-level keys.
    pub fn manifest_keys(manifest: &ElementManifest, expected: &[&str]) {
        let value = serde_json::to_value(manifest).unwrap();
        let Some(map) = value.as_object() else {
            panic!("manifest did not serialize to an object: {value}");
        };
        let mut actual: Vec<&str> = map.keys().map(String::as_str).collect();
        actual.sort_unstable();
        let mut expected = expected.to_vec();
        expected.sort_unstable();
        assert_eq!(actual, expected, "manifest key mismatch");
    }

    /// Assert that a render element carries a class.
    pub fn has_class(element: &RenderElement, class: &str) {
        assert!(
            element.has_class(class),
            "Expected element to have class '{}', got: {:?}",
            class,
            element.attributes
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let id = Uuid::nil();
        let element = test_element("FILL_BLANK")
            .with_id(id)
            .with_field("question", json!("@blank"))
            .build();

        assert_eq!(element.id, id);
        assert_eq!(element.element_type, "FILL_BLANK");
        assert_eq!(element.data["question"], "@blank");
    }

    #[test]
    fn test_with_data_replaces_fields() {
        let element = test_element("HTML")
            .with_field("a", json!(1))
            .with_data(json!({ "b": 2 }))
            .build();
        assert!(element.data.get("a").is_none());
        assert_eq!(element.data["b"], 2);
    }

    #[test]
    fn test_fill_blank_fixture() {
        let element = fill_blank_element();
        assert_eq!(element.data["correct"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_recording_renderer_counts_calls() {
        let renderer = RecordingRenderer::new("rec");
        let element = fill_blank_element();
        let out = renderer.render(&element, &RenderContext::default());

        assert_eq!(renderer.calls(), 1);
        assert_eq!(renderer.seen(), vec![element.id]);
        assert_eq!(out.value.as_deref(), Some("rec"));
        assert::has_class(&out, "recorded");
    }

    #[test]
    fn test_assertions() {
        assert::contains("hello world", "world");
        assert::not_contains("hello world", "foo");
    }
}
