use std::collections::BTreeMap;
use std::sync::Arc;

use psyscore_core::age::Age;
use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::form::FormSnapshot;
use serde::Serialize;

use crate::error::InstrumentError;
use crate::extract::ordinal_fields;
use crate::norms::{IndexCode, IndexNorm, Subtest, WechslerNorms};
use crate::record::ScoreRecord;
use crate::scoring::AnswerRange;
use crate::{Instrument, ScoringContext};

pub const MIN_AGE_YEARS: u32 = 6;
pub const MAX_AGE_YEARS: u32 = 16;

/// Norm table key for an age, e.g. `8y.4m0d-7m30d` for 8 years 5 months.
pub fn age_bracket(age: &Age) -> Option<String> {
    if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age.years) {
        return None;
    }
    let months = match age.months {
        0..=3 => "0m0d-3m30d",
        4..=7 => "4m0d-7m30d",
        _ => "8m0d-11m30d",
    };
    Some(format!("{}y.{months}", age.years))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexResult {
    pub index: IndexCode,
    pub sum: u32,
    /// `None` when the sum has no row in the index table.
    pub norm: Option<IndexNorm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WechslerScores {
    pub bracket: String,
    /// Raw scores as entered, for answered subtests only.
    pub raw: BTreeMap<Subtest, i64>,
    /// One entry per subtest; 0 for missing or unmatched raw scores.
    pub scaled: BTreeMap<Subtest, u32>,
    /// VCI, PRI, WMI, PSI and FSIQ, in that order.
    pub indices: Vec<IndexResult>,
}

impl WechslerScores {
    pub fn index(&self, code: IndexCode) -> Option<&IndexResult> {
        self.indices.iter().find(|r| r.index == code)
    }
}

/// Wechsler intelligence scales for children (6–16 years).
/// Subtest raw scores are converted to scaled scores through
/// age-bracketed norm tables, then summed into the index scores.
pub struct Wechsler {
    norms: Arc<WechslerNorms>,
}

impl Wechsler {
    pub fn new(norms: Arc<WechslerNorms>) -> Self {
        Self { norms }
    }
}

impl Instrument for Wechsler {
    fn id(&self) -> &str {
        "wechsler"
    }

    fn name(&self) -> &str {
        "Wechsler"
    }

    fn template_name(&self) -> &str {
        "Wechsler"
    }

    fn answer_range(&self) -> Option<AnswerRange> {
        None
    }

    fn extract(&self, form: &dyn FormSnapshot) -> AnswerSet {
        ordinal_fields(form, Subtest::ALL.iter().map(|s| s.code().to_string()))
    }

    fn compute(
        &self,
        answers: &AnswerSet,
        context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError> {
        let age = context
            .patient
            .age
            .as_ref()
            .ok_or_else(|| InstrumentError::MissingAge {
                instrument: self.name().to_string(),
            })?;
        let bracket = age_bracket(age).ok_or_else(|| InstrumentError::UnsupportedAge {
            instrument: self.name().to_string(),
            years: age.years,
            supported: format!("{MIN_AGE_YEARS}–{MAX_AGE_YEARS} years"),
        })?;
        if !self.norms.has_bracket(&bracket) {
            return Err(InstrumentError::MissingNormBracket(bracket));
        }

        let mut raw = BTreeMap::new();
        let mut scaled = BTreeMap::new();
        for subtest in Subtest::ALL {
            let value = answers.ordinal(subtest.code());
            let score = match value {
                Some(value) if value >= 0 => self.norms.scaled(&bracket, subtest, value)?,
                _ => 0,
            };
            if let Some(value) = value {
                raw.insert(subtest, value);
            }
            scaled.insert(subtest, score);
        }

        let index_sum = |code: IndexCode| -> u32 {
            code.subtests()
                .iter()
                .map(|s| scaled.get(s).copied().unwrap_or(0))
                .sum()
        };
        let mut sums: Vec<(IndexCode, u32)> = IndexCode::ALL
            .iter()
            .filter(|&&code| code != IndexCode::Fsiq)
            .map(|&code| (code, index_sum(code)))
            .collect();
        let full_scale = sums.iter().map(|(_, sum)| sum).sum();
        sums.push((IndexCode::Fsiq, full_scale));

        let indices = sums
            .into_iter()
            .map(|(index, sum)| IndexResult {
                index,
                sum,
                norm: self.norms.index_norm(index, sum).cloned(),
            })
            .collect();

        Ok(ScoreRecord::Wechsler(WechslerScores {
            bracket,
            raw,
            scaled,
            indices,
        }))
    }
}
