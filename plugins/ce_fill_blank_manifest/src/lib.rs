//! Fill-in-the-blank element: base descriptor.
//!
//! Publishes the `FILL_BLANK` element type descriptor consumed by the
//! display plugin, along with the element's data model, validation rules,
//! and answer checking (see [`data`]).

pub mod data;

use ce_sdk::ElementDescriptor;
use serde_json::json;

pub use ce_sdk::ElementManifest;
pub use data::{AnswerResult, Feedback, FillBlankData, Segment, check_answer, segments, validate};

/// Type tag of the fill-in-the-blank element.
pub const TYPE: &str = "FILL_BLANK";

/// Placeholder marking a blank inside the question text.
pub const BLANK: &str = "@blank";

/// The fill-in-the-blank element descriptor.
pub fn manifest() -> ElementDescriptor {
    ElementDescriptor::new(TYPE)
        .name("Fill in the blank")
        .schema(json!({
            "type": "object",
            "properties": {
                "question": { "type": "string" },
                "correct": {
                    "type": "array",
                    "items": {
                        "type": "array",
                        "items": { "type": "string", "minLength": 1 },
                        "minItems": 1
                    }
                },
                "feedback": {
                    "type": "object",
                    "properties": {
                        "correct": { "type": "string" },
                        "incorrect": { "type": "string" }
                    }
                }
            },
            "required": ["question", "correct"]
        }))
        .init_state(json!({
            "question": "",
            "correct": [],
            "feedback": {}
        }))
        .ui(json!({
            "icon": "mdi-form-textbox",
            "forceFullWidth": true
        }))
        .field("isQuestion", json!(true))
}
