use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One raw answer to a questionnaire item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerValue {
    /// Selected point on an ordinal scale, or a typed raw score.
    Ordinal(i64),
    /// Selected option given by its label (ASRS frequencies, yes/no radios).
    Label(String),
    /// Labels of every checked example in a multi-select group.
    Checked(Vec<String>),
    /// Free-text elaboration.
    Text(String),
}

/// Flat map of question id to answer for one instrument invocation.
///
/// Unanswered questions are absent: empty text and empty checkbox groups
/// are never stored, so presence always means the patient said something.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct AnswerSet {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an answer, dropping blank text and empty checkbox groups.
    pub fn insert(&mut self, question_id: impl Into<String>, value: AnswerValue) {
        let value = match value {
            AnswerValue::Text(text) | AnswerValue::Label(text) if text.trim().is_empty() => {
                return;
            }
            AnswerValue::Text(text) => AnswerValue::Text(text.trim().to_string()),
            AnswerValue::Label(label) => AnswerValue::Label(label.trim().to_string()),
            AnswerValue::Checked(labels) if labels.is_empty() => return,
            other => other,
        };
        self.answers.insert(question_id.into(), value);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, question_id: impl Into<String>, value: AnswerValue) -> Self {
        self.insert(question_id, value);
        self
    }

    pub fn with_ordinal(self, question_id: impl Into<String>, value: i64) -> Self {
        self.with(question_id, AnswerValue::Ordinal(value))
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    pub fn ordinal(&self, question_id: &str) -> Option<i64> {
        match self.answers.get(question_id)? {
            AnswerValue::Ordinal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn label(&self, question_id: &str) -> Option<&str> {
        match self.answers.get(question_id)? {
            AnswerValue::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn checked(&self, question_id: &str) -> &[String] {
        match self.answers.get(question_id) {
            Some(AnswerValue::Checked(labels)) => labels,
            _ => &[],
        }
    }

    pub fn text(&self, question_id: &str) -> Option<&str> {
        match self.answers.get(question_id)? {
            AnswerValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (question_id, value) in iter {
            set.insert(question_id, value);
        }
        set
    }
}
