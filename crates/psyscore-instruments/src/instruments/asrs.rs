use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::form::FormSnapshot;
use serde::Serialize;

use crate::error::InstrumentError;
use crate::extract::insert_label;
use crate::record::ScoreRecord;
use crate::scoring::{AnswerRange, Likelihood, SubscaleDefinition, ValidationError};
use crate::{Instrument, ScoringContext};

pub const ITEMS: u32 = 18;
pub const PART_A_ITEMS: u32 = 6;
pub const ADULT_AGE: u32 = 18;

/// Each positive answer counts one point.
const POSITIVE: AnswerRange = AnswerRange::new(0, 1);

/// Items positive from "sometimes" upward. All others need "often".
const SOMETIMES_POSITIVE: [u32; 7] = [1, 2, 3, 9, 12, 16, 18];

pub static SUBSCALES: [SubscaleDefinition; 3] = [
    SubscaleDefinition::new(
        "inattention",
        "Inattention",
        &[1, 2, 3, 4, 7, 8, 9, 10, 11],
        POSITIVE,
    ),
    SubscaleDefinition::new(
        "hyperactivity_motor",
        "Hyperactivity (motor)",
        &[5, 6, 12, 13, 14],
        POSITIVE,
    ),
    SubscaleDefinition::new(
        "hyperactivity_verbal",
        "Hyperactivity/Impulsivity (verbal)",
        &[15, 16, 17, 18],
        POSITIVE,
    ),
];

/// Adult norm for the total positive count within an age bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeNorm {
    pub min_years: u32,
    /// `None` for the open-ended oldest bracket.
    pub max_years: Option<u32>,
    pub mean: f64,
    pub sd: f64,
}

pub static NORMS: [AgeNorm; 5] = [
    AgeNorm { min_years: 18, max_years: Some(29), mean: 2.99, sd: 4.1 },
    AgeNorm { min_years: 30, max_years: Some(39), mean: 2.59, sd: 3.1 },
    AgeNorm { min_years: 40, max_years: Some(49), mean: 2.26, sd: 3.1 },
    AgeNorm { min_years: 50, max_years: Some(64), mean: 1.82, sd: 3.1 },
    AgeNorm { min_years: 65, max_years: None, mean: 1.23, sd: 2.1 },
];

pub fn norm_for_age(years: u32) -> Option<&'static AgeNorm> {
    NORMS
        .iter()
        .find(|n| years >= n.min_years && n.max_years.is_none_or(|max| years <= max))
}

/// Answer options, in increasing frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Never,
    Rarely,
    Sometimes,
    Often,
    VeryOften,
}

impl Frequency {
    /// Accepts the English and Ukrainian option labels and the option
    /// index `0..=4`.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "never" | "ніколи" | "0" => Some(Frequency::Never),
            "rarely" | "рідко" | "1" => Some(Frequency::Rarely),
            "sometimes" | "іноді" | "2" => Some(Frequency::Sometimes),
            "often" | "часто" | "3" => Some(Frequency::Often),
            "very often" | "дуже часто" | "4" => Some(Frequency::VeryOften),
            _ => None,
        }
    }
}

/// Form field of a 1-based item: items 1–6 are `Aq1..Aq6`, 7–18 are
/// `Bq1..Bq12`.
pub fn item_key(item: u32) -> String {
    if item <= PART_A_ITEMS {
        format!("Aq{item}")
    } else {
        format!("Bq{}", item - PART_A_ITEMS)
    }
}

pub fn is_positive(item: u32, answer: Frequency) -> bool {
    let threshold = if SOMETIMES_POSITIVE.contains(&item) {
        Frequency::Sometimes
    } else {
        Frequency::Often
    };
    answer >= threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotApplicable {
    UnknownAge,
    UnderAge,
}

/// Probability band derived from the age-normed z-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AsrsProbability {
    Assessed { z_score: f64, likelihood: Likelihood },
    NotApplicable { reason: NotApplicable },
}

impl AsrsProbability {
    pub fn label(&self) -> &'static str {
        match self {
            AsrsProbability::Assessed { likelihood, .. } => likelihood.label(),
            AsrsProbability::NotApplicable {
                reason: NotApplicable::UnknownAge,
            } => "not applicable (unknown age)",
            AsrsProbability::NotApplicable {
                reason: NotApplicable::UnderAge,
            } => "not applicable (age under 18)",
        }
    }
}

/// `z <= 1` low, `z <= 2` moderate, otherwise high. Adults only.
pub fn probability(age_years: Option<u32>, overall: u32) -> AsrsProbability {
    let Some(years) = age_years else {
        return AsrsProbability::NotApplicable {
            reason: NotApplicable::UnknownAge,
        };
    };
    let norm = match norm_for_age(years) {
        Some(norm) if years >= ADULT_AGE => norm,
        _ => {
            return AsrsProbability::NotApplicable {
                reason: NotApplicable::UnderAge,
            };
        }
    };

    let z_score = (f64::from(overall) - norm.mean) / norm.sd;
    let likelihood = if z_score <= 1.0 {
        Likelihood::Low
    } else if z_score <= 2.0 {
        Likelihood::Moderate
    } else {
        Likelihood::High
    };
    AsrsProbability::Assessed {
        z_score,
        likelihood,
    }
}

/// ASRS v1.1: Adult ADHD Self-Report Scale, 18 items.
/// Counts positive answers; part A is the 6-item screener.
pub struct Asrs;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsrsScores {
    pub part_a: u32,
    pub part_b: u32,
    pub inattention: u32,
    pub hyperactivity_motor: u32,
    pub hyperactivity_verbal: u32,
    pub overall: u32,
    pub probability: AsrsProbability,
}

impl Instrument for Asrs {
    fn id(&self) -> &str {
        "asrs"
    }

    fn name(&self) -> &str {
        "ASRS v1.1"
    }

    fn template_name(&self) -> &str {
        "ASRS"
    }

    fn answer_range(&self) -> Option<AnswerRange> {
        None
    }

    fn subscales(&self) -> &[SubscaleDefinition] {
        &SUBSCALES
    }

    fn extract(&self, form: &dyn FormSnapshot) -> AnswerSet {
        let mut answers = AnswerSet::new();
        for item in 1..=ITEMS {
            insert_label(&mut answers, form, &item_key(item));
        }
        answers
    }

    fn validate_answers(&self, answers: &AnswerSet) -> Vec<ValidationError> {
        (1..=ITEMS)
            .filter_map(|item| {
                let key = item_key(item);
                let label = answers.label(&key)?;
                Frequency::parse(label).is_none().then(|| ValidationError {
                    question_id: key.clone(),
                    value: label.to_string(),
                    expected: "never, rarely, sometimes, often or very often".to_string(),
                    message: format!("{}: '{}' is not an answer option for {}", self.name(), label, key),
                })
            })
            .collect()
    }

    fn compute(
        &self,
        answers: &AnswerSet,
        context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError> {
        let positives: Vec<u32> = (1..=ITEMS)
            .filter(|&item| {
                answers
                    .label(&item_key(item))
                    .and_then(Frequency::parse)
                    .is_some_and(|answer| is_positive(item, answer))
            })
            .collect();

        let count_in = |items: &[u32]| positives.iter().filter(|p| items.contains(p)).count() as u32;
        let part_a = positives.iter().filter(|&&p| p <= PART_A_ITEMS).count() as u32;
        let overall = positives.len() as u32;

        Ok(ScoreRecord::Asrs(AsrsScores {
            part_a,
            part_b: overall - part_a,
            inattention: count_in(SUBSCALES[0].items),
            hyperactivity_motor: count_in(SUBSCALES[1].items),
            hyperactivity_verbal: count_in(SUBSCALES[2].items),
            overall,
            probability: probability(context.patient.age.map(|a| a.years), overall),
        }))
    }
}
