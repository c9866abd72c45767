//! Render tree consumer - converts RenderElement trees to HTML.
//!
//! A Tera template named `elements/<type>.html` overrides the inline
//! rendering of that element type.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ce_sdk::RenderElement;
use serde_json::Value;
use tera::{Context as TeraContext, Tera};
use tracing::debug;

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "meta", "link"];

/// Consumer that converts RenderElement trees to HTML.
pub struct RenderTreeConsumer {
    tera: Tera,
}

impl RenderTreeConsumer {
    /// Create a consumer with no template overrides.
    pub fn new() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Create a consumer loading template overrides from `template_dir`.
    pub fn with_templates(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;
        debug!(count = tera.get_template_names().count(), "loaded templates");
        Ok(Self { tera })
    }

    /// Create a consumer from an already configured Tera instance.
    pub fn from_tera(tera: Tera) -> Self {
        Self { tera }
    }

    /// Render a RenderElement tree to HTML.
    pub fn render(&self, element: &RenderElement) -> Result<String> {
        let children_html = self.render_children(element)?;

        let template_name = template_for_type(&element.element_type);
        if self.tera.get_template(&template_name).is_ok() {
            let mut context = TeraContext::new();
            context.insert("element", element);
            context.insert("children", &children_html);
            if let Some(value) = &element.value {
                context.insert("value", &process_value(value, element.format.as_deref()));
            }
            if let Some(attrs) = &element.attributes {
                context.insert("attributes", attrs);
            }
            context.insert("class", &class_string(element));

            return self
                .tera
                .render(&template_name, &context)
                .with_context(|| format!("failed to render element type: {}", element.element_type));
        }

        Ok(render_inline(element, &children_html))
    }

    /// Render element children, sorted by weight.
    fn render_children(&self, element: &RenderElement) -> Result<String> {
        if element.children.is_empty() {
            return Ok(String::new());
        }

        let mut children: Vec<_> = element.children.values().collect();
        children.sort_by_key(|child| child.weight.unwrap_or(0));

        let mut html = String::new();
        for child in children {
            html.push_str(&self.render(child)?);
        }
        Ok(html)
    }
}

impl Default for RenderTreeConsumer {
    fn default() -> Self {
        Self::new()
    }
}

fn template_for_type(element_type: &str) -> String {
    format!("elements/{element_type}.html")
}

/// Render an element inline when no template is available.
fn render_inline(element: &RenderElement, children: &str) -> String {
    match element.element_type.as_str() {
        "container" => render_container(element, children),
        "markup" => render_markup(element),
        other => format!(
            "<div class=\"element element--{}{}\">{}</div>",
            html_escape(other),
            prefixed(" ", &class_string(element)),
            children
        ),
    }
}

fn render_container(element: &RenderElement, children: &str) -> String {
    format!(
        "<div class=\"container{}\"{}>{}</div>",
        prefixed(" ", &class_string(element)),
        extra_attrs(element),
        children
    )
}

fn render_markup(element: &RenderElement) -> String {
    let tag = element.tag.as_deref().unwrap_or("span");
    let class = class_string(element);
    let class_attr = if class.is_empty() {
        String::new()
    } else {
        format!(" class=\"{class}\"")
    };
    let attrs = extra_attrs(element);

    if VOID_ELEMENTS.contains(&tag) {
        return format!("<{tag}{class_attr}{attrs} />");
    }

    let value = element
        .value
        .as_ref()
        .map(|v| process_value(v, element.format.as_deref()))
        .unwrap_or_default();
    format!("<{tag}{class_attr}{attrs}>{value}</{tag}>")
}

/// Apply the text format filter; unknown or missing formats are escaped.
fn process_value(value: &str, format: Option<&str>) -> String {
    match format {
        Some("filtered_html") => ammonia::clean(value),
        _ => html_escape(value),
    }
}

fn class_string(element: &RenderElement) -> String {
    let classes = match element.attributes.as_ref().and_then(|a| a.get("class")) {
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    html_escape(&classes)
}

/// Attributes other than `class`, rendered as ` key="value"` pairs.
fn extra_attrs(element: &RenderElement) -> String {
    let Some(Value::Object(obj)) = &element.attributes else {
        return String::new();
    };

    let mut out = String::new();
    for (key, value) in obj.iter().filter(|(k, _)| *k != "class") {
        match value {
            Value::Bool(true) => {
                let _ = write!(out, " {key}");
            }
            Value::Bool(false) | Value::Null => {}
            Value::String(s) => {
                let _ = write!(out, " {key}=\"{}\"", html_escape(s));
            }
            other => {
                let _ = write!(out, " {key}=\"{}\"", html_escape(&other.to_string()));
            }
        }
    }
    out
}

fn prefixed(prefix: &str, s: &str) -> String {
    if s.is_empty() {
        String::new()
    } else {
        format!("{prefix}{s}")
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
