use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::age::{parse_and_age, Age};
use crate::models::form::FormSnapshot;

/// Placeholder shown wherever a free-text identity field was left blank.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    /// Lenient parse of a form value. Accepts English and Ukrainian labels;
    /// anything unrecognised is [`Sex::Unknown`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" | "чоловіча" | "чоловік" => Sex::Male,
            "female" | "f" | "жіноча" | "жінка" => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        }
    }
}

/// Who is being assessed, as captured on every questionnaire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientContext {
    pub name: String,
    /// Raw `dd.mm.yyyy` string as typed, if any.
    pub birth_date: Option<String>,
    /// `None` when the birth date is absent, malformed, impossible, or in
    /// the future relative to `evaluated_on`.
    pub age: Option<Age>,
    pub sex: Sex,
    pub notes: String,
    pub evaluated_on: Date,
}

impl PatientContext {
    pub fn new(
        name: impl Into<String>,
        birth_date: Option<String>,
        sex: Sex,
        notes: impl Into<String>,
        evaluated_on: Date,
    ) -> Self {
        let birth_date = birth_date
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());
        let age = birth_date
            .as_deref()
            .and_then(|b| parse_and_age(b, evaluated_on));
        Self {
            name: name.into().trim().to_string(),
            birth_date,
            age,
            sex,
            notes: notes.into().trim().to_string(),
            evaluated_on,
        }
    }

    /// Read the patient block (`patient_name`, `patient_year`,
    /// `patient_sex`, `optional_text`) from a form snapshot.
    pub fn from_form(form: &dyn FormSnapshot, evaluated_on: Date) -> Self {
        Self::new(
            form.selected("patient_name").unwrap_or_default(),
            form.selected("patient_year"),
            form.selected("patient_sex")
                .map(|s| Sex::parse(&s))
                .unwrap_or_default(),
            form.selected("optional_text").unwrap_or_default(),
            evaluated_on,
        )
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { UNKNOWN } else { &self.name }
    }
}

/// Third party reporting on the patient (CAARS observer forms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InformantInfo {
    pub name: String,
    pub birth_date: Option<String>,
    pub age: Option<Age>,
    pub sex: Sex,
    /// Relation to the patient, e.g. "spouse", "parent".
    pub relation: String,
}

impl InformantInfo {
    pub fn new(
        name: impl Into<String>,
        birth_date: Option<String>,
        sex: Sex,
        relation: impl Into<String>,
        evaluated_on: Date,
    ) -> Self {
        let birth_date = birth_date
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());
        let age = birth_date
            .as_deref()
            .and_then(|b| parse_and_age(b, evaluated_on));
        Self {
            name: name.into().trim().to_string(),
            birth_date,
            age,
            sex,
            relation: relation.into().trim().to_string(),
        }
    }

    /// Read the informant block (`informant_name`, `informant_year`,
    /// `informant_sex`, `informant_relation`). Returns `None` when the form
    /// carries no informant name.
    pub fn from_form(form: &dyn FormSnapshot, evaluated_on: Date) -> Option<Self> {
        let name = form.selected("informant_name")?;
        Some(Self::new(
            name,
            form.selected("informant_year"),
            form.selected("informant_sex")
                .map(|s| Sex::parse(&s))
                .unwrap_or_default(),
            form.selected("informant_relation").unwrap_or_default(),
            evaluated_on,
        ))
    }
}
