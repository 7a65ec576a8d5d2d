use std::collections::BTreeMap;

use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::form::FormSnapshot;
use serde::Serialize;

use crate::error::InstrumentError;
use crate::extract::numbered_questions;
use crate::record::ScoreRecord;
use crate::scoring::{
    classify, question_key, AnswerRange, BandRange, ScaleScore, SubscaleDefinition,
};
use crate::{Instrument, ScoringContext};

pub const ITEMS: u32 = 25;
const AGREEMENT: AnswerRange = AnswerRange::new(1, 7);

/// Items scored in reverse (`v -> 8 - v`).
pub const REVERSED: &[u32] = &[3, 12, 19, 22, 24];

static SUBSCALES: [SubscaleDefinition; 3] = [
    SubscaleDefinition::new(
        "compensation",
        "Compensation",
        &[1, 4, 5, 8, 11, 14, 17, 20, 23],
        AGREEMENT,
    )
    .with_reversed(REVERSED),
    SubscaleDefinition::new(
        "masking",
        "Masking",
        &[2, 6, 9, 12, 15, 18, 21, 24],
        AGREEMENT,
    )
    .with_reversed(REVERSED),
    SubscaleDefinition::new(
        "assimilation",
        "Assimilation",
        &[3, 7, 10, 13, 16, 19, 22, 25],
        AGREEMENT,
    )
    .with_reversed(REVERSED),
];

pub const MIN_OVERALL: u32 = 25;
pub const MAX_OVERALL: u32 = 175;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CamouflagingLevel {
    ExtremelyLow,
    Low,
    Average,
    High,
    ExtremelyHigh,
}

impl CamouflagingLevel {
    pub fn label(self) -> &'static str {
        match self {
            CamouflagingLevel::ExtremelyLow => "Extremely low (at or below the 5th percentile)",
            CamouflagingLevel::Low => "Low (6th to 24th percentile)",
            CamouflagingLevel::Average => "Average (25th to 75th percentile)",
            CamouflagingLevel::High => "High (76th to 94th percentile)",
            CamouflagingLevel::ExtremelyHigh => "Extremely high (at or above the 95th percentile)",
        }
    }
}

pub static BANDS: [BandRange<CamouflagingLevel>; 5] = [
    BandRange { min: 25, max: 51, band: CamouflagingLevel::ExtremelyLow },
    BandRange { min: 52, max: 75, band: CamouflagingLevel::Low },
    BandRange { min: 76, max: 112, band: CamouflagingLevel::Average },
    BandRange { min: 113, max: 136, band: CamouflagingLevel::High },
    BandRange { min: 137, max: 175, band: CamouflagingLevel::ExtremelyHigh },
];

/// CAT-Q: Camouflaging Autistic Traits Questionnaire.
/// 25 items on a 1–7 agreement scale; five items are reverse-scored.
pub struct CatQ;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatQScores {
    pub subscales: Vec<ScaleScore>,
    pub overall: u32,
    /// `None` when unanswered items pull the overall below the scale floor.
    pub level: Option<CamouflagingLevel>,
    /// Answered items after reversal, by question number.
    pub adjusted_answers: BTreeMap<u32, u32>,
}

impl Instrument for CatQ {
    fn id(&self) -> &str {
        "cat_q"
    }

    fn name(&self) -> &str {
        "CAT-Q"
    }

    fn template_name(&self) -> &str {
        "CAT-Q"
    }

    fn answer_range(&self) -> Option<AnswerRange> {
        Some(AGREEMENT)
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

        let level = classify(&BANDS, overall);
        if level.is_none() {
            tracing::warn!(overall, "CAT-Q overall below scale floor, some items unanswered");
        }

        let adjusted_answers = SUBSCALES
            .iter()
            .flat_map(|def| {
                def.items.iter().filter_map(move |&item| {
                    answers
                        .ordinal(&question_key(item))
                        .map(|v| (item, def.adjusted(item, v)))
                })
            })
            .collect();

        Ok(ScoreRecord::CatQ(CatQScores {
            subscales,
            overall,
            level,
            adjusted_answers,
        }))
    }
}
