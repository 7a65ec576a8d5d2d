//! CAARS: Conners' Adult ADHD Rating Scales, self-report long form and
//! observer short form. Both forms share the scale summation and the
//! pairwise Inconsistency Index; they differ in item sets and pairs.

use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::form::FormSnapshot;
use serde::Serialize;

use crate::error::InstrumentError;
use crate::extract::numbered_questions;
use crate::record::ScoreRecord;
use crate::scoring::{question_key, AnswerRange, ScaleScore, SubscaleDefinition};
use crate::{Instrument, ScoringContext};

const RATING: AnswerRange = AnswerRange::new(0, 3);

/// An Inconsistency Index at or above this sum suggests random or
/// insincere responding.
pub const INCONSISTENCY_THRESHOLD: u32 = 8;

pub const FULL_ITEMS: u32 = 66;
pub const SHORT_ITEMS: u32 = 26;

pub static FULL_SCALES: [SubscaleDefinition; 7] = [
    SubscaleDefinition::new(
        "A",
        "Inattention/Memory Problems",
        &[36, 3, 40, 7, 44, 11, 49, 16, 51, 18, 32, 66],
        RATING,
    ),
    SubscaleDefinition::new(
        "B",
        "Hyperactivity/Restlessness",
        &[1, 5, 46, 13, 17, 20, 54, 57, 25, 59, 27, 31],
        RATING,
    ),
    SubscaleDefinition::new(
        "C",
        "Impulsivity/Emotional Lability",
        &[35, 4, 39, 8, 43, 12, 47, 52, 19, 23, 61, 30],
        RATING,
    ),
    SubscaleDefinition::new(
        "D",
        "Problems with Self-Concept",
        &[37, 6, 15, 56, 26, 63],
        RATING,
    ),
    SubscaleDefinition::new(
        "E",
        "DSM-IV Inattentive Symptoms",
        &[2, 42, 48, 24, 60, 29, 64, 65, 33],
        RATING,
    ),
    SubscaleDefinition::new(
        "F",
        "DSM-IV Hyperactive-Impulsive Symptoms",
        &[38, 41, 9, 14, 50, 21, 22, 58, 62],
        RATING,
    ),
    SubscaleDefinition::new(
        "H",
        "ADHD Index",
        &[34, 40, 10, 45, 19, 33, 55, 23, 26, 27, 28, 63],
        RATING,
    ),
];

pub static FULL_PAIRS: [(u32, u32); 8] = [
    (11, 49),
    (40, 44),
    (20, 25),
    (13, 27),
    (30, 47),
    (19, 23),
    (6, 37),
    (28, 63),
];

pub static SHORT_SCALES: [SubscaleDefinition; 5] = [
    SubscaleDefinition::new(
        "A",
        "Inattention/Memory Problems",
        &[4, 8, 13, 18, 22],
        RATING,
    ),
    SubscaleDefinition::new(
        "B",
        "Hyperactivity/Restlessness",
        &[1, 5, 10, 15, 24],
        RATING,
    ),
    SubscaleDefinition::new(
        "C",
        "Impulsivity/Emotional Lability",
        &[2, 7, 11, 19, 25],
        RATING,
    ),
    SubscaleDefinition::new(
        "D",
        "Problems with Self-Concept",
        &[3, 9, 14, 17, 21],
        RATING,
    ),
    SubscaleDefinition::new(
        "E",
        "ADHD Index",
        &[6, 12, 16, 20, 23, 26, 4, 8, 5, 10, 11, 19],
        RATING,
    ),
];

pub static SHORT_PAIRS: [(u32, u32); 8] = [
    (4, 13),
    (8, 22),
    (1, 15),
    (5, 24),
    (2, 11),
    (7, 25),
    (3, 14),
    (9, 21),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairDifference {
    pub first: u32,
    pub second: u32,
    pub difference: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InconsistencyIndex {
    pub pairs: Vec<PairDifference>,
    pub sum: u32,
    pub threshold: u32,
    pub inconsistent: bool,
}

/// Sum of `|a - b|` over the item pairs. Unanswered items count as 0.
pub fn inconsistency_index(answers: &AnswerSet, pairs: &[(u32, u32)]) -> InconsistencyIndex {
    let value = |item: u32| answers.ordinal(&question_key(item)).unwrap_or(0);
    let pairs: Vec<PairDifference> = pairs
        .iter()
        .map(|&(first, second)| PairDifference {
            first,
            second,
            difference: u32::try_from((value(first) - value(second)).abs()).unwrap_or(0),
        })
        .collect();
    let sum = pairs.iter().map(|p| p.difference).sum();
    InconsistencyIndex {
        pairs,
        sum,
        threshold: INCONSISTENCY_THRESHOLD,
        inconsistent: sum >= INCONSISTENCY_THRESHOLD,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaarsScores {
    /// Scales in report order; the long form includes the derived `G`.
    pub scales: Vec<ScaleScore>,
    pub inconsistency: InconsistencyIndex,
}

impl CaarsScores {
    pub fn scale(&self, id: &str) -> Option<&ScaleScore> {
        self.scales.iter().find(|s| s.id == id)
    }
}

fn sum_scales(defs: &[SubscaleDefinition], answers: &AnswerSet) -> Vec<ScaleScore> {
    defs.iter()
        .map(|def| def.score(answers, question_key))
        .collect()
}

/// CAARS-S:L, 66-item self-report long form. `G = E + F`.
pub struct Caars;

impl Instrument for Caars {
    fn id(&self) -> &str {
        "caars"
    }

    fn name(&self) -> &str {
        "CAARS-S:L"
    }

    fn template_name(&self) -> &str {
        "CAARS"
    }

    fn answer_range(&self) -> Option<AnswerRange> {
        Some(RATING)
    }

    fn subscales(&self) -> &[SubscaleDefinition] {
        &FULL_SCALES
    }

    fn extract(&self, form: &dyn FormSnapshot) -> AnswerSet {
        numbered_questions(form, FULL_ITEMS)
    }

    fn compute(
        &self,
        answers: &AnswerSet,
        _context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError> {
        let mut scales = sum_scales(&FULL_SCALES, answers);

        let (e, f) = (&scales[4], &scales[5]);
        let g = ScaleScore {
            id: "G",
            name: "DSM-IV ADHD Symptoms Total",
            sum: e.sum + f.sum,
            max: e.max + f.max,
        };
        // G sits between F and H in the report order.
        scales.insert(6, g);

        let inconsistency = inconsistency_index(answers, &FULL_PAIRS);
        if inconsistency.inconsistent {
            tracing::warn!(sum = inconsistency.sum, "CAARS inconsistency threshold reached");
        }

        Ok(ScoreRecord::Caars(CaarsScores {
            scales,
            inconsistency,
        }))
    }
}

/// CAARS-O:S, 26-item observer short form filled in by an informant.
pub struct CaarsShort;

impl Instrument for CaarsShort {
    fn id(&self) -> &str {
        "caars_short"
    }

    fn name(&self) -> &str {
        "CAARS-O:S"
    }

    fn template_name(&self) -> &str {
        "CAARS-S"
    }

    fn answer_range(&self) -> Option<AnswerRange> {
        Some(RATING)
    }

    fn subscales(&self) -> &[SubscaleDefinition] {
        &SHORT_SCALES
    }

    fn extract(&self, form: &dyn FormSnapshot) -> AnswerSet {
        numbered_questions(form, SHORT_ITEMS)
    }

    fn compute(
        &self,
        answers: &AnswerSet,
        context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError> {
        if context.informant.is_none() {
            return Err(InstrumentError::MissingInformant {
                instrument: self.name().to_string(),
            });
        }

        let inconsistency = inconsistency_index(answers, &SHORT_PAIRS);
        if inconsistency.inconsistent {
            tracing::warn!(sum = inconsistency.sum, "CAARS inconsistency threshold reached");
        }

        Ok(ScoreRecord::CaarsShort(CaarsScores {
            scales: sum_scales(&SHORT_SCALES, answers),
            inconsistency,
        }))
    }
}
