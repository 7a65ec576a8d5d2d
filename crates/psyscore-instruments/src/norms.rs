//! Wechsler norm tables.
//!
//! The tables are licensed test material and are not bundled. They are
//! loaded from a JSON file shaped like:
//!
//! ```json
//! {
//!   "subtests": {
//!     "8y.4m0d-7m30d": { "BD": [{ "scaled": 10, "min": 20, "max": 22 }] }
//!   },
//!   "indices": {
//!     "VCI": { "50": { "iq": "100", "percentile": "50", "ci95": "93-107" } }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InstrumentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subtest {
    #[serde(rename = "BD")]
    BlockDesign,
    #[serde(rename = "SI")]
    Similarities,
    #[serde(rename = "DS")]
    DigitSpan,
    #[serde(rename = "PCn")]
    PictureConcepts,
    #[serde(rename = "CD")]
    Coding,
    #[serde(rename = "VC")]
    Vocabulary,
    #[serde(rename = "LN")]
    LetterNumberSequencing,
    #[serde(rename = "MR")]
    MatrixReasoning,
    #[serde(rename = "CO")]
    Comprehension,
    #[serde(rename = "SS")]
    SymbolSearch,
    #[serde(rename = "PCm")]
    PictureCompletion,
    #[serde(rename = "CA")]
    Cancellation,
    #[serde(rename = "IN")]
    Information,
    #[serde(rename = "AR")]
    Arithmetic,
    #[serde(rename = "WR")]
    WordReasoning,
}

impl Subtest {
    /// Administration order.
    pub const ALL: [Subtest; 15] = [
        Subtest::BlockDesign,
        Subtest::Similarities,
        Subtest::DigitSpan,
        Subtest::PictureConcepts,
        Subtest::Coding,
        Subtest::Vocabulary,
        Subtest::LetterNumberSequencing,
        Subtest::MatrixReasoning,
        Subtest::Comprehension,
        Subtest::SymbolSearch,
        Subtest::PictureCompletion,
        Subtest::Cancellation,
        Subtest::Information,
        Subtest::Arithmetic,
        Subtest::WordReasoning,
    ];

    /// Short code, also used as the form field name.
    pub fn code(self) -> &'static str {
        match self {
            Subtest::BlockDesign => "BD",
            Subtest::Similarities => "SI",
            Subtest::DigitSpan => "DS",
            Subtest::PictureConcepts => "PCn",
            Subtest::Coding => "CD",
            Subtest::Vocabulary => "VC",
            Subtest::LetterNumberSequencing => "LN",
            Subtest::MatrixReasoning => "MR",
            Subtest::Comprehension => "CO",
            Subtest::SymbolSearch => "SS",
            Subtest::PictureCompletion => "PCm",
            Subtest::Cancellation => "CA",
            Subtest::Information => "IN",
            Subtest::Arithmetic => "AR",
            Subtest::WordReasoning => "WR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for Subtest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexCode {
    Vci,
    Pri,
    Wmi,
    Psi,
    Fsiq,
}

impl IndexCode {
    pub const ALL: [IndexCode; 5] = [
        IndexCode::Vci,
        IndexCode::Pri,
        IndexCode::Wmi,
        IndexCode::Psi,
        IndexCode::Fsiq,
    ];

    pub fn code(self) -> &'static str {
        match self {
            IndexCode::Vci => "VCI",
            IndexCode::Pri => "PRI",
            IndexCode::Wmi => "WMI",
            IndexCode::Psi => "PSI",
            IndexCode::Fsiq => "FSIQ",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IndexCode::Vci => "Verbal Comprehension Index",
            IndexCode::Pri => "Perceptual Reasoning Index",
            IndexCode::Wmi => "Working Memory Index",
            IndexCode::Psi => "Processing Speed Index",
            IndexCode::Fsiq => "Full Scale IQ",
        }
    }

    /// Subtests summed into the index. Empty for FSIQ, which is the sum
    /// of the four other index sums.
    pub fn subtests(self) -> &'static [Subtest] {
        use Subtest::*;
        match self {
            IndexCode::Vci => &[
                Similarities,
                Vocabulary,
                Comprehension,
                Information,
                WordReasoning,
            ],
            IndexCode::Pri => &[
                BlockDesign,
                PictureConcepts,
                MatrixReasoning,
                PictureCompletion,
            ],
            IndexCode::Wmi => &[DigitSpan, LetterNumberSequencing, Arithmetic],
            IndexCode::Psi => &[Coding, SymbolSearch, Cancellation],
            IndexCode::Fsiq => &[],
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.code() == code)
    }
}

/// Raw scores in `min..=max` convert to `scaled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledRange {
    pub scaled: u32,
    pub min: i64,
    pub max: i64,
}

impl ScaledRange {
    pub fn contains(&self, raw: i64) -> bool {
        raw >= self.min && raw <= self.max
    }
}

/// Norm row for one index sum. Values are kept as printed in the manual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexNorm {
    pub iq: String,
    pub percentile: String,
    pub ci95: String,
}

#[derive(Deserialize)]
struct NormFile {
    #[serde(default)]
    subtests: BTreeMap<String, BTreeMap<String, Vec<ScaledRange>>>,
    #[serde(default)]
    indices: BTreeMap<String, BTreeMap<u32, IndexNorm>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WechslerNorms {
    subtests: BTreeMap<String, BTreeMap<Subtest, Vec<ScaledRange>>>,
    indices: BTreeMap<IndexCode, BTreeMap<u32, IndexNorm>>,
}

impl WechslerNorms {
    /// Parse and check a norm file. Unknown codes and overlapping ranges
    /// within one subtest are rejected.
    pub fn from_json(json: &str) -> Result<Self, InstrumentError> {
        let file: NormFile = serde_json::from_str(json)?;

        let mut subtests = BTreeMap::new();
        for (bracket, tables) in file.subtests {
            let mut typed = BTreeMap::new();
            for (code, mut ranges) in tables {
                let subtest = Subtest::from_code(&code).ok_or_else(|| {
                    InstrumentError::NormTable(format!("{bracket}: unknown subtest {code}"))
                })?;
                ranges.sort_by_key(|r| r.min);
                check_ranges(&bracket, subtest, &ranges)?;
                typed.insert(subtest, ranges);
            }
            subtests.insert(bracket, typed);
        }

        let mut indices = BTreeMap::new();
        for (code, table) in file.indices {
            let index = IndexCode::from_code(&code)
                .ok_or_else(|| InstrumentError::NormTable(format!("unknown index {code}")))?;
            indices.insert(index, table);
        }

        Ok(Self { subtests, indices })
    }

    pub fn load(path: &Path) -> Result<Self, InstrumentError> {
        let json = std::fs::read_to_string(path).map_err(|source| InstrumentError::NormFile {
            path: path.display().to_string(),
            source,
        })?;
        let norms = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            brackets = norms.subtests.len(),
            "loaded Wechsler norms"
        );
        Ok(norms)
    }

    pub fn is_empty(&self) -> bool {
        self.subtests.is_empty() && self.indices.is_empty()
    }

    pub fn has_bracket(&self, bracket: &str) -> bool {
        self.subtests.contains_key(bracket)
    }

    pub fn brackets(&self) -> impl Iterator<Item = &str> {
        self.subtests.keys().map(String::as_str)
    }

    /// Scaled score for a raw score, or 0 when no range matches.
    pub fn scaled(&self, bracket: &str, subtest: Subtest, raw: i64) -> Result<u32, InstrumentError> {
        let tables = self
            .subtests
            .get(bracket)
            .ok_or_else(|| InstrumentError::MissingNormBracket(bracket.to_string()))?;
        let scaled = tables
            .get(&subtest)
            .and_then(|ranges| ranges.iter().find(|r| r.contains(raw)))
            .map(|r| r.scaled);
        if scaled.is_none() {
            tracing::debug!(bracket, %subtest, raw, "raw score outside norm ranges");
        }
        Ok(scaled.unwrap_or(0))
    }

    pub fn index_norm(&self, index: IndexCode, sum: u32) -> Option<&IndexNorm> {
        self.indices.get(&index)?.get(&sum)
    }
}

fn check_ranges(bracket: &str, subtest: Subtest, sorted: &[ScaledRange]) -> Result<(), InstrumentError> {
    if let Some(bad) = sorted.iter().find(|r| r.min > r.max) {
        return Err(InstrumentError::NormTable(format!(
            "{bracket} {subtest}: empty range {}..={}",
            bad.min, bad.max
        )));
    }
    if let Some(pair) = sorted.windows(2).find(|w| w[1].min <= w[0].max) {
        return Err(InstrumentError::NormTable(format!(
            "{bracket} {subtest}: ranges {}..={} and {}..={} overlap",
            pair[0].min, pair[0].max, pair[1].min, pair[1].max
        )));
    }
    Ok(())
}
