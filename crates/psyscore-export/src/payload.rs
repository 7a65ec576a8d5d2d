use std::collections::BTreeMap;

use serde::Serialize;

/// A single payload value as seen by templates and the email transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
}

impl PayloadValue {
    /// Plain rendering for places that only accept strings.
    pub fn to_text(&self) -> String {
        match self {
            PayloadValue::Text(s) => s.clone(),
            PayloadValue::Integer(n) => n.to_string(),
            PayloadValue::Number(n) => n.to_string(),
            PayloadValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<u32> for PayloadValue {
    fn from(value: u32) -> Self {
        PayloadValue::Integer(i64::from(value))
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Integer(value)
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        PayloadValue::Number(value)
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Bool(value)
    }
}

/// Flat string-keyed map fed both to document templates and to the
/// email transport. Later inserts overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultPayload {
    fields: BTreeMap<String, PayloadValue>,
}

impl ResultPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PayloadValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key)? {
            PayloadValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.fields.get(key)? {
            PayloadValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
