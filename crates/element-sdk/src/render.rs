//! Render capability and render element builder API.
//!
//! Renderers return structured JSON render elements (never raw HTML).
//! The host sanitizes and renders these to markup.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::types::{ContentElement, RenderContext};

/// Behavior that turns an element's data into a visual representation.
///
/// The host may call `render` from many authoring sessions at once, so
/// implementations must not keep per-call state on `self`.
pub trait RenderCapability: Send + Sync {
    /// Render `element` for the given context.
    fn render(&self, element: &ContentElement, ctx: &RenderContext) -> RenderElement;

    /// Identifier used when a manifest is serialized.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A render element in the JSON render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderElement {
    #[serde(rename = "#type")]
    pub element_type: String,
    #[serde(rename = "#weight", skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    #[serde(rename = "#tag", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "#value", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "#format", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "#attributes", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    #[serde(flatten)]
    pub children: BTreeMap<String, RenderElement>,
}

impl RenderElement {
    pub fn set_child(&mut self, key: &str, element: RenderElement) {
        self.children.insert(key.into(), element);
    }

    pub fn child(&self, key: &str) -> Option<&RenderElement> {
        self.children.get(key)
    }

    /// Attribute value by name, if present.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.as_ref().and_then(|a| a.get(key))
    }

    /// Whether the element's class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .and_then(|c| c.as_array())
            .is_some_and(|classes| classes.iter().any(|c| c.as_str() == Some(class)))
    }
}

/// Builder for constructing render elements.
pub struct ElementBuilder {
    element_type: String,
    weight: Option<i32>,
    tag: Option<String>,
    value: Option<String>,
    format: Option<String>,
    classes: Vec<String>,
    attrs: serde_json::Map<String, Value>,
    children: BTreeMap<String, RenderElement>,
}

impl ElementBuilder {
    fn new(element_type: &str) -> Self {
        Self {
            element_type: element_type.into(),
            weight: None,
            tag: None,
            value: None,
            format: None,
            classes: Vec::new(),
            attrs: serde_json::Map::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn weight(mut self, w: i32) -> Self {
        self.weight = Some(w);
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Boolean attribute, rendered bare when true and omitted when false.
    pub fn flag(mut self, key: &str, on: bool) -> Self {
        self.attrs.insert(key.into(), Value::Bool(on));
        self
    }

    pub fn child(mut self, key: &str, element: RenderElement) -> Self {
        self.children.insert(key.into(), element);
        self
    }

    pub fn build(self) -> RenderElement {
        let attributes = if self.classes.is_empty() && self.attrs.is_empty() {
            None
        } else {
            let mut map = self.attrs;
            if !self.classes.is_empty() {
                map.insert(
                    "class".into(),
                    Value::Array(self.classes.into_iter().map(Value::String).collect()),
                );
            }
            Some(Value::Object(map))
        };

        RenderElement {
            element_type: self.element_type,
            weight: self.weight,
            tag: self.tag,
            value: self.value,
            format: self.format,
            attributes,
            children: self.children,
        }
    }
}

/// Create a container element (groups children).
pub fn container() -> ElementBuilder {
    ElementBuilder::new("container")
}

/// Create a markup element with an HTML tag and text value.
pub fn markup(tag: &str, value: &str) -> ElementBuilder {
    let mut b = ElementBuilder::new("markup");
    b.tag = Some(tag.into());
    b.value = Some(value.into());
    b
}

/// Create a markup element with a text format (for filtered HTML, etc.).
pub fn filtered_markup(tag: &str, value: &str, format: &str) -> ElementBuilder {
    let mut b = markup(tag, value);
    b.format = Some(format.into());
    b
}

/// Create a text input element.
pub fn input(name: &str, value: &str) -> ElementBuilder {
    let mut b = ElementBuilder::new("markup");
    b.tag = Some("input".into());
    b.attrs.insert("type".into(), Value::String("text".into()));
    b.attrs.insert("name".into(), Value::String(name.into()));
    b.attrs.insert("value".into(), Value::String(value.into()));
    b
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_classes_into_attributes() {
        let el = container().class("a").class("b").attr("id", "x").build();
        assert_eq!(el.attr("class"), Some(&json!(["a", "b"])));
        assert_eq!(el.attr("id"), Some(&json!("x")));
        assert!(el.has_class("b"));
        assert!(!el.has_class("c"));
    }

    #[test]
    fn builder_without_attributes_omits_them() {
        let el = markup("p", "Hello").build();
        assert!(el.attributes.is_none());
        let value = serde_json::to_value(&el).unwrap();
        assert_eq!(
            value,
            json!({ "#type": "markup", "#tag": "p", "#value": "Hello" })
        );
    }

    #[test]
    fn children_serialize_flattened() {
        let el = container()
            .child("body", markup("p", "Text").weight(1).build())
            .build();
        let value = serde_json::to_value(&el).unwrap();
        assert_eq!(value["body"]["#weight"], 1);

        let back: RenderElement = serde_json::from_value(value).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn input_sets_name_and_value() {
        let el = input("blank-0", "Paris").flag("readonly", true).build();
        assert_eq!(el.tag.as_deref(), Some("input"));
        assert_eq!(el.attr("name"), Some(&json!("blank-0")));
        assert_eq!(el.attr("value"), Some(&json!("Paris")));
        assert_eq!(el.attr("readonly"), Some(&json!(true)));
    }

    #[test]
    fn filtered_markup_carries_format() {
        let el = filtered_markup("span", "<b>x</b>", "filtered_html").build();
        assert_eq!(el.format.as_deref(), Some("filtered_html"));
        assert_eq!(el.tag.as_deref(), Some("span"));
    }

    struct Named;

    impl RenderCapability for Named {
        fn render(&self, _element: &ContentElement, _ctx: &RenderContext) -> RenderElement {
            container().build()
        }
    }

    #[test]
    fn default_name_is_type_name() {
        assert!(Named.name().ends_with("Named"));
    }
}
