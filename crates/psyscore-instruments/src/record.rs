use serde::Serialize;

use crate::instruments::adhd_rs::AdhdRsScores;
use crate::instruments::asrs::AsrsScores;
use crate::instruments::caars::CaarsScores;
use crate::instruments::cat_q::CatQScores;
use crate::instruments::diva5::Diva5Scores;
use crate::instruments::wechsler::WechslerScores;
use crate::instruments::wurs::WursScores;

/// Result of scoring one instrument invocation.
///
/// Records are rebuilt from scratch on every scoring call and never
/// patched afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "instrument", content = "scores", rename_all = "snake_case")]
pub enum ScoreRecord {
    AdhdRs(AdhdRsScores),
    Asrs(AsrsScores),
    Wurs(WursScores),
    Caars(CaarsScores),
    CaarsShort(CaarsScores),
    CatQ(CatQScores),
    Diva5(Diva5Scores),
    Wechsler(WechslerScores),
}
