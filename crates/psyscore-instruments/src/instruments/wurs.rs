use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::form::FormSnapshot;
use serde::Serialize;

use crate::error::InstrumentError;
use crate::extract::numbered_questions;
use crate::record::ScoreRecord;
use crate::scoring::{
    classify, question_key, AnswerRange, BandRange, Likelihood, ScaleScore, SubscaleDefinition,
};
use crate::{Instrument, ScoringContext};

pub const ITEMS: u32 = 25;
const RATING: AnswerRange = AnswerRange::new(0, 4);

static SUBSCALES: [SubscaleDefinition; 3] = [
    SubscaleDefinition::new(
        "impulsiveness",
        "Impulsiveness and behavioural problems",
        &[5, 6, 8, 10, 12, 13, 14, 15, 16, 19, 20, 21, 22],
        RATING,
    ),
    SubscaleDefinition::new(
        "inattention",
        "Inattention and school problems",
        &[1, 4, 7, 17, 23, 24, 25],
        RATING,
    ),
    SubscaleDefinition::new(
        "self_esteem",
        "Low self-esteem and poor mood",
        &[2, 4, 11, 13, 20],
        RATING,
    ),
];

/// Overall is the sum of the subscale sums, so items shared between
/// subscales count once per membership. Range is `0..=100`.
pub static BANDS: [BandRange<Likelihood>; 3] = [
    BandRange { min: 0, max: 29, band: Likelihood::Low },
    BandRange { min: 30, max: 50, band: Likelihood::Moderate },
    BandRange { min: 51, max: 100, band: Likelihood::High },
];

/// WURS-25: Wender Utah Rating Scale, 25-item version.
/// Retrospective childhood ADHD symptoms rated 0–4.
pub struct Wurs;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WursScores {
    pub subscales: Vec<ScaleScore>,
    pub overall: u32,
    pub max_overall: u32,
    pub likelihood: Likelihood,
}

pub fn max_overall() -> u32 {
    SUBSCALES.iter().map(SubscaleDefinition::max_raw).sum()
}

impl Instrument for Wurs {
    fn id(&self) -> &str {
        "wurs25"
    }

    fn name(&self) -> &str {
        "WURS-25"
    }

    fn template_name(&self) -> &str {
        "WURS"
    }

    fn answer_range(&self) -> Option<AnswerRange> {
        Some(RATING)
    }

    fn subscales(&self) -> &[SubscaleDefinition] {
        &SUBSCALES
    }

    fn extract(&self, form: &dyn FormSnapshot) -> AnswerSet {
        numbered_questions(form, ITEMS)
    }

    fn compute(
        &self,
        answers: &AnswerSet,
        _context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError> {
        let subscales: Vec<ScaleScore> = SUBSCALES
            .iter()
            .map(|def| def.score(answers, question_key))
            .collect();
        let overall = subscales.iter().map(|s| s.sum).sum();
        let likelihood = classify(&BANDS, overall).unwrap_or(Likelihood::High);

        Ok(ScoreRecord::Wurs(WursScores {
            subscales,
            overall,
            max_overall: max_overall(),
            likelihood,
        }))
    }
}
