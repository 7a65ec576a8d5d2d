//! DIVA-5: Diagnostic Interview for ADHD in adults.
//!
//! The interview is categorical. A symptom counts as present in a life
//! period when the clinician recorded any evidence for it there, either a
//! checked example or free text. The yes/no flags are derived here from
//! that evidence rather than read back from mirrored UI widgets.

use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::form::FormSnapshot;
use serde::Serialize;

use crate::error::InstrumentError;
use crate::extract::{insert_checked, insert_label, insert_text, parse_yes_no};
use crate::record::ScoreRecord;
use crate::scoring::{AnswerRange, ValidationError};
use crate::{Instrument, ScoringContext};

pub const SYMPTOMS_PER_DOMAIN: u32 = 9;

/// Inattention plus hyperactivity symptoms needed in one period for the
/// combined criterion.
pub const COMBINED_THRESHOLD: u32 = 6;

pub const ONSET_FIELD: &str = "part_B";
pub const ONSET_TEXT_FIELD: &str = "part_B_text";
pub const NOTES_FIELD: &str = "part_E";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Adult,
    Child,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Adult, Period::Child];

    pub fn key(self) -> &'static str {
        match self {
            Period::Adult => "adult",
            Period::Child => "child",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomDomain {
    /// Criterion A1, symptoms `A1..A9`.
    Inattention,
    /// Criterion A2, symptoms `H1..H9`.
    Hyperactivity,
}

impl SymptomDomain {
    pub const ALL: [SymptomDomain; 2] = [SymptomDomain::Inattention, SymptomDomain::Hyperactivity];

    pub fn prefix(self) -> char {
        match self {
            SymptomDomain::Inattention => 'A',
            SymptomDomain::Hyperactivity => 'H',
        }
    }
}

/// Life areas assessed for impairment (part C), by field code.
pub static LIFE_DOMAINS: [(&str, Period, &str); 10] = [
    ("C1", Period::Adult, "Work/education"),
    ("C2", Period::Adult, "Relationships/family"),
    ("C3", Period::Adult, "Leisure/hobbies"),
    ("C4", Period::Adult, "Social contacts"),
    ("C5", Period::Adult, "Self-confidence/self-image"),
    ("C6", Period::Child, "Education"),
    ("C7", Period::Child, "Social contacts"),
    ("C8", Period::Child, "Self-confidence/self-image"),
    ("C9", Period::Child, "Family"),
    ("C10", Period::Child, "Leisure/hobbies"),
];

pub fn symptom_code(domain: SymptomDomain, index: u32) -> String {
    format!("{}{}", domain.prefix(), index)
}

pub fn examples_field(code: &str, period: Period) -> String {
    format!("{code}_{}", period.key())
}

pub fn symptom_text_field(code: &str, period: Period) -> String {
    format!("{code}_text_{}", period.key())
}

pub fn impairment_field(period: Period) -> String {
    format!("part_C_{}", period.key())
}

pub fn domain_text_field(code: &str) -> String {
    format!("{code}_text")
}

/// Checked examples plus free text recorded for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evidence {
    pub examples: Vec<String>,
    pub text: Option<String>,
}

impl Evidence {
    fn read(answers: &AnswerSet, examples_field: &str, text_field: &str) -> Self {
        Self {
            examples: answers.checked(examples_field).to_vec(),
            text: answers.text(text_field).map(str::to_string),
        }
    }

    pub fn is_present(&self) -> bool {
        !self.examples.is_empty() || self.text.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomFinding {
    pub code: String,
    pub domain: SymptomDomain,
    pub adult: Evidence,
    pub child: Evidence,
}

impl SymptomFinding {
    pub fn evidence(&self, period: Period) -> &Evidence {
        match period {
            Period::Adult => &self.adult,
            Period::Child => &self.child,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeDomainFinding {
    pub code: &'static str,
    pub name: &'static str,
    pub period: Period,
    pub evidence: Evidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub inattention: u32,
    pub hyperactivity: u32,
    /// `inattention + hyperactivity >= 6`.
    pub combined_met: bool,
    /// Part C answer for the period.
    pub impairment: bool,
    /// Life domains with recorded difficulties.
    pub impaired_domains: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diva5Scores {
    pub symptoms: Vec<SymptomFinding>,
    /// Part B: symptoms present since childhood.
    pub onset_in_childhood: bool,
    pub onset_text: Option<String>,
    pub life_domains: Vec<LifeDomainFinding>,
    pub adult: PeriodSummary,
    pub child: PeriodSummary,
    pub notes: Option<String>,
}

impl Diva5Scores {
    pub fn summary(&self, period: Period) -> &PeriodSummary {
        match period {
            Period::Adult => &self.adult,
            Period::Child => &self.child,
        }
    }

    pub fn count(&self, domain: SymptomDomain, period: Period) -> u32 {
        self.symptoms
            .iter()
            .filter(|s| s.domain == domain && s.evidence(period).is_present())
            .count() as u32
    }
}

fn yes_no_fields() -> Vec<String> {
    let mut fields = vec![ONSET_FIELD.to_string()];
    fields.extend(Period::ALL.iter().map(|&p| impairment_field(p)));
    fields
}

pub struct Diva5;

impl Instrument for Diva5 {
    fn id(&self) -> &str {
        "diva5"
    }

    fn name(&self) -> &str {
        "DIVA-5"
    }

    fn template_name(&self) -> &str {
        "ADHD_DIVA5"
    }

    fn answer_range(&self) -> Option<AnswerRange> {
        None
    }

    fn extract(&self, form: &dyn FormSnapshot) -> AnswerSet {
        let mut answers = AnswerSet::new();

        for domain in SymptomDomain::ALL {
            for index in 1..=SYMPTOMS_PER_DOMAIN {
                let code = symptom_code(domain, index);
                for period in Period::ALL {
                    insert_checked(&mut answers, form, &examples_field(&code, period));
                    insert_text(&mut answers, form, &symptom_text_field(&code, period));
                }
            }
        }

        for field in yes_no_fields() {
            insert_label(&mut answers, form, &field);
        }
        insert_text(&mut answers, form, ONSET_TEXT_FIELD);

        for (code, _, _) in &LIFE_DOMAINS {
            insert_checked(&mut answers, form, code);
            insert_text(&mut answers, form, &domain_text_field(code));
        }
        insert_text(&mut answers, form, NOTES_FIELD);

        answers
    }

    fn validate_answers(&self, answers: &AnswerSet) -> Vec<ValidationError> {
        yes_no_fields()
            .into_iter()
            .filter_map(|field| {
                let label = answers.label(&field)?;
                parse_yes_no(label).is_none().then(|| ValidationError {
                    question_id: field.clone(),
                    value: label.to_string(),
                    expected: "yes or no".to_string(),
                    message: format!("{}: '{}' is not a yes/no answer for {}", self.name(), label, field),
                })
            })
            .collect()
    }

    fn compute(
        &self,
        answers: &AnswerSet,
        _context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError> {
        let mut symptoms = Vec::new();
        for domain in SymptomDomain::ALL {
            for index in 1..=SYMPTOMS_PER_DOMAIN {
                let code = symptom_code(domain, index);
                let read = |period| {
                    Evidence::read(
                        answers,
                        &examples_field(&code, period),
                        &symptom_text_field(&code, period),
                    )
                };
                symptoms.push(SymptomFinding {
                    adult: read(Period::Adult),
                    child: read(Period::Child),
                    code,
                    domain,
                });
            }
        }

        let life_domains: Vec<LifeDomainFinding> = LIFE_DOMAINS
            .iter()
            .map(|&(code, period, name)| LifeDomainFinding {
                code,
                name,
                period,
                evidence: Evidence::read(answers, code, &domain_text_field(code)),
            })
            .collect();

        let summarize = |period: Period| {
            let count = |domain: SymptomDomain| {
                symptoms
                    .iter()
                    .filter(|s| s.domain == domain && s.evidence(period).is_present())
                    .count() as u32
            };
            let inattention = count(SymptomDomain::Inattention);
            let hyperactivity = count(SymptomDomain::Hyperactivity);
            let impaired_domains = life_domains
                .iter()
                .filter(|d| d.period == period && d.evidence.is_present())
                .count() as u32;
            // An explicit part C answer wins; otherwise recorded difficulties imply yes.
            let impairment = answers
                .label(&impairment_field(period))
                .and_then(parse_yes_no)
                .unwrap_or(impaired_domains > 0);
            PeriodSummary {
                inattention,
                hyperactivity,
                combined_met: inattention + hyperactivity >= COMBINED_THRESHOLD,
                impairment,
                impaired_domains,
            }
        };
        let adult = summarize(Period::Adult);
        let child = summarize(Period::Child);

        Ok(ScoreRecord::Diva5(Diva5Scores {
            symptoms,
            onset_in_childhood: answers
                .label(ONSET_FIELD)
                .and_then(parse_yes_no)
                .unwrap_or(false),
            onset_text: answers.text(ONSET_TEXT_FIELD).map(str::to_string),
            life_domains,
            adult,
            child,
            notes: answers.text(NOTES_FIELD).map(str::to_string),
        }))
    }
}
