//! The read-only view of submitted form state that answer extraction needs.
//!
//! The UI layer owns the widgets; the engine only queries a snapshot by
//! stable field name (`question_3`, `section_2_q1`, `A4_adult`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Queryable snapshot of one submitted questionnaire form.
pub trait FormSnapshot {
    /// Every field name present in the snapshot, in a stable order.
    fn field_names(&self) -> Vec<String>;

    /// The single selected or typed value of a field. Blank values read as
    /// `None`, the same as an untouched field.
    fn selected(&self, field: &str) -> Option<String>;

    /// All checked values of a multi-select field.
    fn checked(&self, field: &str) -> Vec<String>;
}

/// A raw form value as posted by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(i64),
    Text(String),
    Many(Vec<String>),
}

/// In-memory [`FormSnapshot`] backed by a JSON object of field values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    fields: BTreeMap<String, FormValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(CoreError::InvalidForm(
                "form snapshot must be a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn set(&mut self, field: impl Into<String>, value: FormValue) -> &mut Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Number(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<Vec<&str>> for FormValue {
    fn from(values: Vec<&str>) -> Self {
        FormValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl FormSnapshot for FormState {
    fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn selected(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            FormValue::Number(n) => Some(n.to_string()),
            FormValue::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            FormValue::Many(values) => values
                .iter()
                .map(|v| v.trim())
                .find(|v| !v.is_empty())
                .map(str::to_string),
        }
    }

    fn checked(&self, field: &str) -> Vec<String> {
        match self.fields.get(field) {
            Some(FormValue::Many(values)) => values
                .iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
            Some(FormValue::Text(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            Some(FormValue::Number(n)) => vec![n.to_string()],
            _ => Vec::new(),
        }
    }
}
