//! Learner-facing renderer for fill-in-the-blank elements.

use ce_fill_blank_manifest::{FillBlankData, Segment, check_answer, segments, validate};
use ce_sdk::prelude::*;
use tracing::debug;

/// Renders the question with one text input per blank.
///
/// Stateless: responses and submission state come from the
/// [`RenderContext`] on each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Display;

const ROOT_CLASS: &str = "ce-fill-blank";

impl RenderCapability for Display {
    fn render(&self, element: &ContentElement, ctx: &RenderContext) -> RenderElement {
        for problem in validate(&element.data) {
            debug!(element_id = %element.id, %problem, "rendering invalid element data");
        }
        let data = FillBlankData::from_value(&element.data);

        let submitted = ctx.is_submitted();
        let result = ctx
            .user_state
            .as_ref()
            .filter(|s| s.submitted)
            .map(|s| check_answer(&data, &s.responses));

        let mut question = render::container().class(&format!("{ROOT_CLASS}__question"));
        for (i, segment) in segments(&data.question).into_iter().enumerate() {
            let key = format!("segment_{i:03}");
            let child = match segment {
                Segment::Text(text) => render::filtered_markup("span", text, "filtered_html"),
                Segment::Blank(n) => {
                    let mut input =
                        render::input(&format!("blank-{n}"), ctx.response(n).unwrap_or(""))
                            .class(&format!("{ROOT_CLASS}__blank"))
                            .attr("aria-label", &format!("Blank {}", n + 1))
                            .flag("readonly", ctx.readonly || submitted);
                    if let Some(result) = &result {
                        let correct = result.blanks.get(n).copied().unwrap_or(false);
                        input = input.class(if correct {
                            "blank--correct"
                        } else {
                            "blank--incorrect"
                        });
                    }
                    input
                }
            };
            let weight = i32::try_from(i).unwrap_or(i32::MAX);
            question = question.child(&key, child.weight(weight).build());
        }

        let mut root = render::container()
            .class(ROOT_CLASS)
            .attr("data-element-id", &element.id.to_string())
            .child("question", question.weight(0).build());

        if !ctx.readonly && !submitted {
            root = root.child(
                "submit",
                render::markup("button", "Submit")
                    .class(&format!("{ROOT_CLASS}__submit"))
                    .attr("type", "submit")
                    .weight(1)
                    .build(),
            );
        }

        if let Some(result) = result {
            let (class, text) = if result.is_correct {
                ("correct", data.feedback.correct.as_deref().unwrap_or("Correct"))
            } else {
                (
                    "incorrect",
                    data.feedback.incorrect.as_deref().unwrap_or("Incorrect"),
                )
            };
            root = root.child(
                "feedback",
                render::filtered_markup("p", text, "filtered_html")
                    .class(&format!("{ROOT_CLASS}__feedback"))
                    .class(&format!("{ROOT_CLASS}__feedback--{class}"))
                    .weight(2)
                    .build(),
            );
        }

        root.build()
    }

    fn name(&self) -> &str {
        "FillBlankDisplay"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element() -> ContentElement {
        ContentElement::new(
            "FILL_BLANK",
            json!({
                "question": "2 + 2 = @blank, 3 + 3 = @blank",
                "correct": [["4", "four"], ["6"]],
                "feedback": { "correct": "Well done", "incorrect": "Check your sums" }
            }),
        )
    }

    fn blank(tree: &RenderElement, n: usize) -> &RenderElement {
        tree.child("question")
            .unwrap()
            .children
            .values()
            .find(|c| c.attr("name").and_then(|v| v.as_str()) == Some(format!("blank-{n}").as_str()))
            .unwrap()
    }

    #[test]
    fn renders_one_input_per_blank() {
        let tree = Display.render(&element(), &RenderContext::default());
        let question = tree.child("question").unwrap();
        let inputs = question
            .children
            .values()
            .filter(|c| c.tag.as_deref() == Some("input"))
            .count();
        assert_eq!(inputs, 2);
        assert_eq!(question.children.len(), 4);
        assert!(tree.has_class("ce-fill-blank"));
    }

    #[test]
    fn segments_are_weighted_in_question_order() {
        let tree = Display.render(&element(), &RenderContext::default());
        let question = tree.child("question").unwrap();
        let weights: Vec<i32> = question.children.values().map(|c| c.weight.unwrap()).collect();
        assert_eq!(weights, vec![0, 1, 2, 3]);
        assert_eq!(
            question.child("segment_000").unwrap().value.as_deref(),
            Some("2 + 2 = ")
        );
    }

    #[test]
    fn editable_context_shows_submit_and_no_feedback() {
        let tree = Display.render(&element(), &RenderContext::default());
        assert!(tree.child("submit").is_some());
        assert!(tree.child("feedback").is_none());
        assert_eq!(blank(&tree, 0).attr("readonly"), Some(&json!(false)));
    }

    #[test]
    fn readonly_context_hides_submit() {
        let tree = Display.render(&element(), &RenderContext::readonly());
        assert!(tree.child("submit").is_none());
        assert_eq!(blank(&tree, 1).attr("readonly"), Some(&json!(true)));
    }

    #[test]
    fn unsubmitted_responses_fill_inputs() {
        let ctx = RenderContext::default().with_user_state(UserState::new(vec!["4".into()]));
        let tree = Display.render(&element(), &ctx);
        assert_eq!(blank(&tree, 0).attr("value"), Some(&json!("4")));
        assert_eq!(blank(&tree, 1).attr("value"), Some(&json!("")));
        assert!(!blank(&tree, 0).has_class("blank--correct"));
    }

    #[test]
    fn submitted_correct_answers_show_positive_feedback() {
        let ctx = RenderContext::default()
            .with_user_state(UserState::new(vec!["Four".into(), "6".into()]).submitted());
        let tree = Display.render(&element(), &ctx);

        assert!(blank(&tree, 0).has_class("blank--correct"));
        assert!(blank(&tree, 1).has_class("blank--correct"));
        assert!(tree.child("submit").is_none());
        let feedback = tree.child("feedback").unwrap();
        assert!(feedback.has_class("ce-fill-blank__feedback--correct"));
        assert_eq!(feedback.value.as_deref(), Some("Well done"));
    }

    #[test]
    fn submitted_wrong_answer_marks_blank() {
        let ctx = RenderContext::default()
            .with_user_state(UserState::new(vec!["4".into(), "7".into()]).submitted());
        let tree = Display.render(&element(), &ctx);

        assert!(blank(&tree, 0).has_class("blank--correct"));
        assert!(blank(&tree, 1).has_class("blank--incorrect"));
        let feedback = tree.child("feedback").unwrap();
        assert_eq!(feedback.value.as_deref(), Some("Check your sums"));
    }

    #[test]
    fn missing_feedback_falls_back_to_generic_text() {
        let element = ContentElement::new(
            "FILL_BLANK",
            json!({ "question": "@blank", "correct": [["x"]] }),
        );
        let ctx = RenderContext::default()
            .with_user_state(UserState::new(vec!["x".into()]).submitted());
        let tree = Display.render(&element, &ctx);
        assert_eq!(tree.child("feedback").unwrap().value.as_deref(), Some("Correct"));
    }

    #[test]
    fn blank_without_answer_set_is_not_reported_correct() {
        let element = ContentElement::new(
            "FILL_BLANK",
            json!({ "question": "@blank and @blank", "correct": [["a"]] }),
        );
        let ctx = RenderContext::default()
            .with_user_state(UserState::new(vec!["a".into(), "b".into()]).submitted());
        let tree = Display.render(&element, &ctx);

        assert!(blank(&tree, 0).has_class("blank--correct"));
        assert!(blank(&tree, 1).has_class("blank--incorrect"));
        let feedback = tree.child("feedback").unwrap();
        assert!(feedback.has_class("ce-fill-blank__feedback--incorrect"));
    }

    #[test]
    fn malformed_data_renders_empty_question() {
        let element = ContentElement::new("FILL_BLANK", json!("not an object"));
        let tree = Display.render(&element, &RenderContext::default());
        assert!(tree.child("question").unwrap().children.is_empty());
    }

    #[test]
    fn element_id_is_exposed() {
        let element = element();
        let tree = Display.render(&element, &RenderContext::default());
        assert_eq!(
            tree.attr("data-element-id"),
            Some(&json!(element.id.to_string()))
        );
    }
}
