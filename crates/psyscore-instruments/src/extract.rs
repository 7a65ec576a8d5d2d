//! Helpers that turn a [`FormSnapshot`] into an [`AnswerSet`].
//!
//! Extraction only reads. Values that cannot be interpreted for their
//! field kind are left out, so the scorer sees them as unanswered.

use psyscore_core::models::answer::{AnswerSet, AnswerValue};
use psyscore_core::models::form::FormSnapshot;

use crate::scoring::question_key;

/// Parse an ordinal radio value or a typed raw score.
pub fn parse_ordinal(field: &str, raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(field, raw, "ignoring non-numeric answer");
            None
        }
    }
}

/// Read the given fields as ordinal answers, keyed verbatim.
pub fn ordinal_fields<I>(form: &dyn FormSnapshot, fields: I) -> AnswerSet
where
    I: IntoIterator<Item = String>,
{
    let mut answers = AnswerSet::new();
    for field in fields {
        if let Some(value) = form
            .selected(&field)
            .and_then(|raw| parse_ordinal(&field, &raw))
        {
            answers.insert(field, AnswerValue::Ordinal(value));
        }
    }
    answers
}

/// Read `question_1..=question_<count>` as ordinal answers.
pub fn numbered_questions(form: &dyn FormSnapshot, count: u32) -> AnswerSet {
    ordinal_fields(form, (1..=count).map(question_key))
}

/// Read a single-choice field as a label answer.
pub fn insert_label(answers: &mut AnswerSet, form: &dyn FormSnapshot, field: &str) {
    if let Some(label) = form.selected(field) {
        answers.insert(field, AnswerValue::Label(label));
    }
}

/// Read a free-text field.
pub fn insert_text(answers: &mut AnswerSet, form: &dyn FormSnapshot, field: &str) {
    if let Some(text) = form.selected(field) {
        answers.insert(field, AnswerValue::Text(text));
    }
}

/// Read a checkbox group as the list of checked labels.
pub fn insert_checked(answers: &mut AnswerSet, form: &dyn FormSnapshot, field: &str) {
    let checked = form.checked(field);
    if !checked.is_empty() {
        answers.insert(field, AnswerValue::Checked(checked));
    }
}

/// Interpret a yes/no radio label. Accepts English and Ukrainian.
pub fn parse_yes_no(label: &str) -> Option<bool> {
    match label.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "так" => Some(true),
        "no" | "n" | "false" | "0" | "ні" => Some(false),
        _ => None,
    }
}
