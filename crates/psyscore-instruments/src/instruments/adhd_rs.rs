use psyscore_core::models::answer::{AnswerSet, AnswerValue};
use psyscore_core::models::form::FormSnapshot;
use serde::Serialize;

use crate::error::InstrumentError;
use crate::extract::ordinal_fields;
use crate::record::ScoreRecord;
use crate::scoring::{AnswerRange, Likelihood, SubscaleDefinition};
use crate::{Instrument, ScoringContext};

pub const SECTIONS: u32 = 18;
const RATING: AnswerRange = AnswerRange::new(0, 3);

/// Section numbers, each contributing its maximum rating.
static SUBSCALES: [SubscaleDefinition; 2] = [
    SubscaleDefinition::new(
        "inattention",
        "Inattention",
        &[1, 2, 3, 4, 5, 6, 7, 8, 9],
        RATING,
    ),
    SubscaleDefinition::new(
        "hyperactivity",
        "Hyperactivity/Impulsivity",
        &[10, 11, 12, 13, 14, 15, 16, 17, 18],
        RATING,
    ),
];

/// ADHD-RS-IV: ADHD Rating Scale, adult version.
/// 18 symptom sections, each holding several rows rated 0–3. A section
/// scores the highest rating selected in it.
pub struct AdhdRs;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdhdRsScores {
    /// Highest rating per section, index 0 is section 1.
    pub section_maxima: Vec<u32>,
    pub inattention: u32,
    pub hyperactivity: u32,
    pub overall: u32,
    pub max_overall: u32,
    pub percent: f64,
    pub likelihood: Likelihood,
}

/// Parse a `section_<s>_q<n>` field name into `(s, n)`.
pub fn parse_section_key(key: &str) -> Option<(u32, u32)> {
    let rest = key.strip_prefix("section_")?;
    let (section, row) = rest.split_once("_q")?;
    Some((section.parse().ok()?, row.parse().ok()?))
}

/// Severity wording for a single section maximum.
pub fn section_label(max: u32) -> &'static str {
    match max {
        0 => "absent",
        1 => "mild",
        2 => "moderate",
        3 => "high",
        _ => "unknown",
    }
}

/// `<= 39%` low, `<= 69%` moderate, above that high.
pub fn likelihood(overall: u32, max_overall: u32) -> (f64, Likelihood) {
    let percent = f64::from(overall) / f64::from(max_overall) * 100.0;
    let likelihood = if percent <= 39.0 {
        Likelihood::Low
    } else if percent <= 69.0 {
        Likelihood::Moderate
    } else {
        Likelihood::High
    };
    (percent, likelihood)
}

impl Instrument for AdhdRs {
    fn id(&self) -> &str {
        "adhd_rs_iv"
    }

    fn name(&self) -> &str {
        "ADHD-RS-IV"
    }

    fn template_name(&self) -> &str {
        "ADHD-RS"
    }

    fn answer_range(&self) -> Option<AnswerRange> {
        Some(RATING)
    }

    fn subscales(&self) -> &[SubscaleDefinition] {
        &SUBSCALES
    }

    fn extract(&self, form: &dyn FormSnapshot) -> AnswerSet {
        let fields = form
            .field_names()
            .into_iter()
            .filter(|name| {
                parse_section_key(name).is_some_and(|(s, _)| (1..=SECTIONS).contains(&s))
            });
        ordinal_fields(form, fields)
    }

    fn compute(
        &self,
        answers: &AnswerSet,
        _context: &ScoringContext,
    ) -> Result<ScoreRecord, InstrumentError> {
        let mut section_maxima = vec![0u32; SECTIONS as usize];
        for (key, value) in answers.iter() {
            let (Some((section, _)), AnswerValue::Ordinal(rating)) = (parse_section_key(key), value)
            else {
                continue;
            };
            if !(1..=SECTIONS).contains(&section) {
                continue;
            }
            let slot = &mut section_maxima[(section - 1) as usize];
            *slot = (*slot).max(u32::try_from(*rating).unwrap_or(0));
        }

        let section_sum = |def: &SubscaleDefinition| -> u32 {
            def.items
                .iter()
                .map(|&s| section_maxima[(s - 1) as usize])
                .sum()
        };
        let inattention = section_sum(&SUBSCALES[0]);
        let hyperactivity = section_sum(&SUBSCALES[1]);
        let overall = inattention + hyperactivity;
        let max_overall = SUBSCALES[0].max_raw() + SUBSCALES[1].max_raw();
        let (percent, likelihood) = likelihood(overall, max_overall);

        Ok(ScoreRecord::AdhdRs(AdhdRsScores {
            section_maxima,
            inattention,
            hyperactivity,
            overall,
            max_overall,
            percent,
            likelihood,
        }))
    }
}
