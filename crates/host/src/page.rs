//! Page rendering: a sequence of content elements to HTML.

use anyhow::{Context, Result};
use ce_sdk::{ContentElement, RenderContext};
use tracing::warn;

use crate::registry::ElementRegistry;
use crate::render::RenderTreeConsumer;

/// Render `elements` in order, concatenating their HTML.
///
/// Elements whose type has no registered manifest are skipped.
pub fn render_elements(
    registry: &ElementRegistry,
    consumer: &RenderTreeConsumer,
    elements: &[ContentElement],
    ctx: &RenderContext,
) -> Result<String> {
    let mut html = String::new();
    for element in elements {
        let Some(tree) = registry.render(element, ctx) else {
            warn!(
                element_id = %element.id,
                element_type = %element.element_type,
                "skipping element of unregistered type"
            );
            continue;
        };
        let rendered = consumer
            .render(&tree)
            .with_context(|| format!("failed to render element {}", element.id))?;
        html.push_str(&rendered);
    }
    Ok(html)
}
