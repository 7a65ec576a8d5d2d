use std::path::Path;
use std::sync::Arc;

use jiff::civil::date;
use psyscore_core::age::Age;
use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::form::FormState;
use psyscore_core::models::patient::{PatientContext, Sex};
use psyscore_instruments::error::InstrumentError;
use psyscore_instruments::instruments::wechsler::{age_bracket, Wechsler, WechslerScores};
use psyscore_instruments::norms::{IndexCode, Subtest, WechslerNorms};
use psyscore_instruments::record::ScoreRecord;
use psyscore_instruments::{Catalog, Instrument, ScoringContext};

const NORMS: &str = include_str!("fixtures/wechsler_norms.json");

fn norms() -> Arc<WechslerNorms> {
    Arc::new(WechslerNorms::from_json(NORMS).unwrap())
}

fn context(birth_date: Option<&str>) -> ScoringContext {
    ScoringContext::new(PatientContext::new(
        "Child",
        birth_date.map(str::to_string),
        Sex::Male,
        "",
        date(2026, 10, 17),
    ))
}

/// 8 years, 5 months, 7 days on the evaluation date.
const EIGHT_AND_FIVE: &str = "10.05.2018";
const EIGHT_AND_FIVE_BRACKET: &str = "8y.4m0d-7m30d";

fn uniform(raw: i64) -> AnswerSet {
    Subtest::ALL
        .iter()
        .fold(AnswerSet::new(), |set, s| set.with_ordinal(s.code(), raw))
}

fn scores(answers: &AnswerSet) -> WechslerScores {
    let wechsler = Wechsler::new(norms());
    match wechsler.score(answers, &context(Some(EIGHT_AND_FIVE))).unwrap() {
        ScoreRecord::Wechsler(scores) => scores,
        other => panic!("unexpected record: {other:?}"),
    }
}

fn age(years: u32, months: u32) -> Age {
    Age {
        years,
        months,
        days: 0,
    }
}

#[test]
fn bracket_keys_follow_month_ranges() {
    assert_eq!(age_bracket(&age(8, 5)).as_deref(), Some("8y.4m0d-7m30d"));
    assert_eq!(age_bracket(&age(6, 0)).as_deref(), Some("6y.0m0d-3m30d"));
    assert_eq!(age_bracket(&age(16, 11)).as_deref(), Some("16y.8m0d-11m30d"));
    assert_eq!(age_bracket(&age(5, 11)), None);
    assert_eq!(age_bracket(&age(17, 0)), None);
}

#[test]
fn scaled_scores_and_indices() {
    let s = scores(&uniform(15));
    assert_eq!(s.bracket, "8y.4m0d-7m30d");
    assert!(s.scaled.values().all(|&v| v == 10));

    let vci = s.index(IndexCode::Vci).unwrap();
    assert_eq!(vci.sum, 50);
    assert_eq!(vci.norm.as_ref().unwrap().iq, "100");

    let sums: Vec<u32> = s.indices.iter().map(|r| r.sum).collect();
    assert_eq!(sums, vec![50, 40, 30, 30, 150]);
    let fsiq = s.index(IndexCode::Fsiq).unwrap();
    assert_eq!(fsiq.norm.as_ref().unwrap().ci95, "95-105");
}

#[test]
fn missing_and_unmatched_raw_scores_scale_to_zero() {
    let answers = uniform(15)
        .with_ordinal("BD", 99)
        .with_ordinal("CD", -3);
    let answers: AnswerSet = answers
        .iter()
        .filter(|(k, _)| *k != "WR")
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    let s = scores(&answers);

    assert_eq!(s.scaled[&Subtest::WordReasoning], 0);
    assert_eq!(s.scaled[&Subtest::BlockDesign], 0);
    assert_eq!(s.scaled[&Subtest::Coding], 0);
    assert!(!s.raw.contains_key(&Subtest::WordReasoning));

    let vci = s.index(IndexCode::Vci).unwrap();
    assert_eq!(vci.sum, 40);
    assert_eq!(vci.norm.as_ref().unwrap().iq, "86");
    // PRI drops to 30, which has no row in the fixture.
    assert!(s.index(IndexCode::Pri).unwrap().norm.is_none());
}

#[test]
fn raw_zero_is_looked_up_like_any_other_score() {
    let s = scores(&uniform(15).with_ordinal("BD", 0));

    // The fixture maps raw 0..=9 to scaled 5; a zero raw score is a real
    // answer, not a missing one.
    assert_eq!(s.raw[&Subtest::BlockDesign], 0);
    assert_eq!(s.scaled[&Subtest::BlockDesign], 5);
    assert_eq!(norms().scaled(EIGHT_AND_FIVE_BRACKET, Subtest::BlockDesign, 0).unwrap(), 5);
}

#[test]
fn unsupported_ages_are_reported() {
    let wechsler = Wechsler::new(norms());
    let answers = uniform(15);

    let five = wechsler.score(&answers, &context(Some("01.01.2021")));
    assert!(matches!(
        five,
        Err(InstrumentError::UnsupportedAge { years: 5, .. })
    ));

    let seventeen = wechsler.score(&answers, &context(Some("01.01.2009")));
    assert!(matches!(
        seventeen,
        Err(InstrumentError::UnsupportedAge { years: 17, .. })
    ));

    let unknown = wechsler.score(&answers, &context(None));
    assert!(matches!(unknown, Err(InstrumentError::MissingAge { .. })));
}

#[test]
fn absent_bracket_is_reported() {
    let answers = uniform(15);
    let nine = Wechsler::new(norms()).score(&answers, &context(Some("01.01.2017")));
    assert!(matches!(nine, Err(InstrumentError::MissingNormBracket(key)) if key == "9y.8m0d-11m30d"));

    let empty = Catalog::new().get("wechsler").unwrap();
    assert!(matches!(
        empty.score(&answers, &context(Some(EIGHT_AND_FIVE))),
        Err(InstrumentError::MissingNormBracket(_))
    ));
}

#[test]
fn overlapping_ranges_are_rejected() {
    let json = r#"{
        "subtests": {
            "8y.4m0d-7m30d": {
                "BD": [
                    { "scaled": 1, "min": 0, "max": 5 },
                    { "scaled": 2, "min": 5, "max": 9 }
                ]
            }
        }
    }"#;
    assert!(matches!(
        WechslerNorms::from_json(json),
        Err(InstrumentError::NormTable(_))
    ));
}

#[test]
fn unknown_codes_are_rejected() {
    let subtest = r#"{ "subtests": { "8y.4m0d-7m30d": { "XX": [] } } }"#;
    assert!(WechslerNorms::from_json(subtest).is_err());
    let index = r#"{ "indices": { "GAI": {} } }"#;
    assert!(WechslerNorms::from_json(index).is_err());
}

#[test]
fn loads_norms_from_disk() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wechsler_norms.json");
    let loaded = WechslerNorms::load(&path).unwrap();
    assert!(loaded.has_bracket("8y.4m0d-7m30d"));
    assert_eq!(loaded.brackets().count(), 1);

    let missing = WechslerNorms::load(Path::new("/nonexistent/norms.json"));
    assert!(matches!(missing, Err(InstrumentError::NormFile { .. })));
}

#[test]
fn extraction_reads_subtest_codes() {
    let form = FormState::new()
        .with("BD", "21")
        .with("PCn", 12i64)
        .with("SI", "")
        .with("patient_name", "Child");
    let answers = Wechsler::new(norms()).extract(&form);
    assert_eq!(answers.len(), 2);
    assert_eq!(answers.ordinal("BD"), Some(21));
}
