//! Element data, validation rules, and answer checking.
//!
//! The question is text (filtered HTML) in which each `@blank` marks a gap.
//! `correct[i]` lists every accepted answer for the i-th gap.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::BLANK;

/// Data stored on a fill-in-the-blank element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillBlankData {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub correct: Vec<Vec<String>>,
    #[serde(default)]
    pub feedback: Feedback,
}

/// Feedback shown after the learner submits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorrect: Option<String>,
}

impl FillBlankData {
    /// Read element data leniently; anything unreadable yields empty data.
    pub fn from_value(data: &Value) -> Self {
        serde_json::from_value(data.clone()).unwrap_or_default()
    }

    pub fn blank_count(&self) -> usize {
        self.question.matches(BLANK).count()
    }
}

/// A piece of the question text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// The n-th gap, counting from zero.
    Blank(usize),
}

/// Split a question into text and blank segments, in order.
///
/// Empty text between adjacent blanks is omitted.
pub fn segments(question: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    for (i, text) in question.split(BLANK).enumerate() {
        if i > 0 {
            out.push(Segment::Blank(i - 1));
        }
        if !text.is_empty() {
            out.push(Segment::Text(text));
        }
    }
    out
}

/// Check element data against the fill-in-the-blank rules.
///
/// Returns one message per problem; an empty list means the data is valid.
/// Rendering never rejects data: the display logs these problems and
/// renders what it can.
pub fn validate(data: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(obj) = data.as_object() else {
        errors.push("fill_blank: data must be an object".to_string());
        return errors;
    };

    let question = match obj.get("question") {
        Some(Value::String(q)) => q.as_str(),
        Some(_) => {
            errors.push("fill_blank: 'question' must be a string".to_string());
            return errors;
        }
        None => {
            errors.push("fill_blank: missing required field 'question'".to_string());
            return errors;
        }
    };

    if strips_markup(question) {
        errors.push("fill_blank: 'question' contains disallowed HTML".to_string());
    }

    let blanks = question.matches(BLANK).count();
    if blanks == 0 {
        errors.push(format!("fill_blank: question must contain at least one {BLANK}"));
    }

    let data = FillBlankData::from_value(data);
    if data.correct.len() != blanks {
        errors.push(format!(
            "fill_blank: question has {blanks} blank(s) but {} answer set(s)",
            data.correct.len()
        ));
    }

    for (i, answers) in data.correct.iter().enumerate() {
        if answers.iter().all(|a| a.trim().is_empty()) {
            errors.push(format!("fill_blank: blank {i} has no accepted answer"));
        }
    }

    errors
}

/// Whether sanitizing `question` would drop a tag or attribute.
///
/// Only removals count. Escaping of stray `&` or `<` and the closing of
/// unclosed tags are normalizations, not disallowed markup.
fn strips_markup(question: &str) -> bool {
    let cleaned = ammonia::clean(question);
    let before = opening_tags(question);
    let after = opening_tags(&cleaned);
    before.len() != after.len()
        || before
            .iter()
            .zip(&after)
            .any(|((tag, attrs), (kept_tag, kept_attrs))| {
                tag != kept_tag || attrs.iter().any(|a| !kept_attrs.contains(a))
            })
}

/// Opening tags in document order, each with its attribute names.
fn opening_tags(html: &str) -> Vec<(String, Vec<String>)> {
    let is_name_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == ':' || c == '_';

    let mut tags = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        rest = &rest[start + 1..];
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }
        let end = rest.find('>').unwrap_or(rest.len());
        let mut parts = rest[..end].trim_end_matches('/').split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let attrs = parts
            .filter_map(|part| part.split('=').next())
            .filter(|attr| !attr.is_empty() && attr.chars().all(is_name_char))
            .map(str::to_ascii_lowercase)
            .collect();
        tags.push((name, attrs));
        rest = &rest[end..];
    }
    tags
}

/// Outcome of checking a learner's responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Per-blank correctness, one entry per blank in the question.
    pub blanks: Vec<bool>,
    pub is_correct: bool,
}

/// Compare `responses` against the accepted answers.
///
/// Matching ignores surrounding whitespace and letter case. A missing
/// response is wrong, and so is any blank without an accepted answer set.
pub fn check_answer(data: &FillBlankData, responses: &[String]) -> AnswerResult {
    let blanks: Vec<bool> = (0..data.blank_count())
        .map(|i| {
            let (Some(accepted), Some(response)) = (data.correct.get(i), responses.get(i)) else {
                return false;
            };
            let response = normalize(response);
            !response.is_empty() && accepted.iter().any(|a| normalize(a) == response)
        })
        .collect();
    let is_correct = !blanks.is_empty() && blanks.iter().all(|ok| *ok);
    AnswerResult { blanks, is_correct }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}
