//! Declarative building blocks shared by the instrument definitions:
//! answer ranges, subscales with optional reversal, band tables and the
//! validation error type.

use psyscore_core::models::answer::AnswerSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Inclusive range of valid ordinal answers for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerRange {
    pub min: i64,
    pub max: i64,
}

impl AnswerRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Mirror a value across the range, e.g. `1..=7` maps `v` to `8 - v`.
    pub fn reflect(&self, value: i64) -> i64 {
        self.min + self.max - value
    }
}

/// A named, fixed group of items summed into one sub-score.
///
/// Item numbers are 1-based question numbers. `max_raw` is derived from
/// the definition itself, never from the answers.
#[derive(Debug, Clone, Copy)]
pub struct SubscaleDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub items: &'static [u32],
    pub answer_range: AnswerRange,
    /// Items whose value is reflected across `answer_range` before summing.
    pub reversed: &'static [u32],
}

impl SubscaleDefinition {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        items: &'static [u32],
        answer_range: AnswerRange,
    ) -> Self {
        Self {
            id,
            name,
            items,
            answer_range,
            reversed: &[],
        }
    }

    pub const fn with_reversed(mut self, reversed: &'static [u32]) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn max_raw(&self) -> u32 {
        self.items.len() as u32 * self.answer_range.max.max(0) as u32
    }

    /// Value an answer contributes to this subscale after reversal.
    pub fn adjusted(&self, item: u32, value: i64) -> u32 {
        let value = if self.reversed.contains(&item) {
            self.answer_range.reflect(value)
        } else {
            value
        };
        u32::try_from(value).unwrap_or(0)
    }

    /// Sum the answered items. Unanswered items contribute zero.
    pub fn sum(&self, answers: &AnswerSet, key: impl Fn(u32) -> String) -> u32 {
        self.items
            .iter()
            .filter_map(|&item| answers.ordinal(&key(item)).map(|v| self.adjusted(item, v)))
            .sum()
    }

    pub fn score(&self, answers: &AnswerSet, key: impl Fn(u32) -> String) -> ScaleScore {
        ScaleScore {
            id: self.id,
            name: self.name,
            sum: self.sum(answers, key),
            max: self.max_raw(),
        }
    }
}

/// Computed sum of one subscale together with its ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleScore {
    pub id: &'static str,
    pub name: &'static str,
    pub sum: u32,
    pub max: u32,
}

/// Form field name used by instruments numbered `question_1..question_n`.
pub fn question_key(item: u32) -> String {
    format!("question_{item}")
}

/// Closed score interval mapped to a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRange<B> {
    pub min: u32,
    pub max: u32,
    pub band: B,
}

/// The band whose closed interval contains `score`, if any.
pub fn classify<B: Copy>(table: &[BandRange<B>], score: u32) -> Option<B> {
    table
        .iter()
        .find(|r| score >= r.min && score <= r.max)
        .map(|r| r.band)
}

/// True when `table` is sorted, starts at `min`, ends at `max` and every
/// interval begins right after the previous one ends.
pub fn partitions<B>(table: &[BandRange<B>], min: u32, max: u32) -> bool {
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return false;
    };
    first.min == min
        && last.max == max
        && table.iter().all(|r| r.min <= r.max)
        && table.windows(2).all(|w| w[1].min == w[0].max + 1)
}

/// Three-level likelihood used by the ADHD screening instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Likelihood {
    Low,
    Moderate,
    High,
}

impl Likelihood {
    pub fn label(self) -> &'static str {
        match self {
            Likelihood::Low => "low",
            Likelihood::Moderate => "moderate",
            Likelihood::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: String,
    pub value: String,
    pub expected: String,
    pub message: String,
}
