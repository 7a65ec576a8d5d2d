//! psyscore-instruments
//!
//! The scoring engine. Each supported questionnaire is an [`Instrument`]:
//! it knows its form fields, validates raw answers against its definition
//! and turns them into a [`ScoreRecord`]. Scoring is pure and
//! deterministic, so the quick result and the final submission always agree.

pub mod error;
pub mod extract;
pub mod instruments;
pub mod norms;
pub mod record;
pub mod scoring;

use std::sync::Arc;

use psyscore_core::models::answer::{AnswerSet, AnswerValue};
use psyscore_core::models::form::FormSnapshot;
use psyscore_core::models::patient::{InformantInfo, PatientContext};

use error::InstrumentError;
use norms::WechslerNorms;
use record::ScoreRecord;
use scoring::{AnswerRange, SubscaleDefinition, ValidationError};

/// Everything about the people involved that scoring may depend on.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub patient: PatientContext,
    /// Only the CAARS observer form uses an informant.
    pub informant: Option<InformantInfo>,
}

impl ScoringContext {
    pub fn new(patient: PatientContext) -> Self {
        Self {
            patient,
            informant: None,
        }
    }

    pub fn with_informant(mut self, informant: InformantInfo) -> Self {
        self.informant = Some(informant);
        self
    }
}

/// Trait implemented by each clinical questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier (e.g., "asrs", "caars_short").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "ASRS v1.1").
    fn name(&self) -> &str;

    /// Name of the document template rendered for this instrument.
    fn template_name(&self) -> &str;

    /// Valid range of ordinal answers, when the instrument uses them.
    fn answer_range(&self) -> Option<AnswerRange>;

    /// Fixed subscales of this instrument, if it has any.
    fn subscales(&self) -> &[SubscaleDefinition] {
        &[]
    }

    /// Read this instrument's fields out of a form snapshot.
    fn extract(&self, form: &dyn FormSnapshot) -> AnswerSet;

    /// Check every answer against the instrument definition.
    fn validate_answers(&self, answers: &AnswerSet) -> Vec<ValidationError> {
        let Some(range) = self.answer_range() else {
            return Vec::new();
        };

        let mut errors = Vec::new();
        for (question_id, value) in answers.iter() {
            if let AnswerValue::Ordinal(v) = value
                && !range.contains(*v)
            {
                errors.push(ValidationError {
                    question_id: question_id.to_string(),
                    value: v.to_string(),
                    expected: format!("{}..={}", range.min, range.max),
                    message: format!(
                        "{}: answer {} to {} is outside range [{}, {}]",
                        self.name(),
                        v,
                        question_id,
                        range.min,
                        range.max,
                    ),
                });
            }
        }
        errors
    }

    /// Compute the score record from answers that already passed validation.
    fn compute(
        &self,
        answers: &AnswerSet,
        context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError>;

    /// Validate and score. Empty answer sets and invalid answers are
    /// rejected with a named error instead of producing all-zero scores.
    fn score(
        &self,
        answers: &AnswerSet,
        context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError> {
        if answers.is_empty() {
            return Err(InstrumentError::NoAnswers {
                instrument: self.name().to_string(),
            });
        }

        let errors = self.validate_answers(answers);
        if !errors.is_empty() {
            return Err(InstrumentError::InvalidAnswers {
                instrument: self.name().to_string(),
                errors,
            });
        }

        let record = self.compute(answers, context)?;
        tracing::debug!(instrument = self.id(), answered = answers.len(), "scored");
        Ok(record)
    }
}

/// The set of available instruments, carrying the norm data that the
/// Wechsler scoring needs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    wechsler_norms: Arc<WechslerNorms>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wechsler_norms(norms: WechslerNorms) -> Self {
        Self {
            wechsler_norms: Arc::new(norms),
        }
    }

    pub fn instruments(&self) -> Vec<Box<dyn Instrument>> {
        vec![
            Box::new(instruments::adhd_rs::AdhdRs),
            Box::new(instruments::asrs::Asrs),
            Box::new(instruments::wurs::Wurs),
            Box::new(instruments::caars::Caars),
            Box::new(instruments::caars::CaarsShort),
            Box::new(instruments::cat_q::CatQ),
            Box::new(instruments::diva5::Diva5),
            Box::new(instruments::wechsler::Wechsler::new(
                self.wechsler_norms.clone(),
            )),
        ]
    }

    pub fn get(&self, id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
        self.instruments()
            .into_iter()
            .find(|i| i.id() == id)
            .ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
    }
}

/// Return all registered instruments, without Wechsler norm data.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    Catalog::default().instruments()
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
