use jiff::civil::date;
use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::patient::{InformantInfo, PatientContext, Sex};
use psyscore_instruments::error::InstrumentError;
use psyscore_instruments::instruments::caars::{
    inconsistency_index, Caars, CaarsScores, CaarsShort, FULL_ITEMS, FULL_PAIRS, SHORT_ITEMS,
    SHORT_PAIRS, SHORT_SCALES,
};
use psyscore_instruments::record::ScoreRecord;
use psyscore_instruments::scoring::question_key;
use psyscore_instruments::{Instrument, ScoringContext};

fn today() -> jiff::civil::Date {
    date(2026, 10, 17)
}

fn context() -> ScoringContext {
    ScoringContext::new(PatientContext::new(
        "Test Patient",
        Some("02.02.1985".to_string()),
        Sex::Male,
        "",
        today(),
    ))
}

fn informant() -> InformantInfo {
    InformantInfo::new("Maria", None, Sex::Female, "spouse", today())
}

fn uniform(items: u32, rating: i64) -> AnswerSet {
    (1..=items).fold(AnswerSet::new(), |set, q| set.with_ordinal(question_key(q), rating))
}

fn full(answers: &AnswerSet) -> CaarsScores {
    match Caars.score(answers, &context()).unwrap() {
        ScoreRecord::Caars(scores) => scores,
        other => panic!("unexpected record: {other:?}"),
    }
}

#[test]
fn long_form_reports_scales_in_order() {
    let s = full(&uniform(FULL_ITEMS, 1));
    let ids: Vec<&str> = s.scales.iter().map(|x| x.id).collect();
    assert_eq!(ids, vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
}

#[test]
fn g_is_sum_of_e_and_f() {
    let s = full(&uniform(FULL_ITEMS, 3));
    let (e, f, g) = (
        s.scale("E").unwrap(),
        s.scale("F").unwrap(),
        s.scale("G").unwrap(),
    );
    assert_eq!(e.sum, 27);
    assert_eq!(f.sum, 27);
    assert_eq!(g.sum, e.sum + f.sum);
    assert_eq!(g.max, 54);
    assert_eq!(s.scale("A").unwrap().sum, 36);
}

#[test]
fn identical_pair_answers_are_consistent() {
    let s = full(&uniform(FULL_ITEMS, 2));
    assert_eq!(s.inconsistency.sum, 0);
    assert!(!s.inconsistency.inconsistent);
    assert_eq!(s.inconsistency.pairs.len(), FULL_PAIRS.len());
}

#[test]
fn inconsistency_threshold_is_inclusive() {
    let answers = uniform(FULL_ITEMS, 0)
        .with_ordinal(question_key(11), 3)
        .with_ordinal(question_key(40), 3)
        .with_ordinal(question_key(20), 2);
    let index = inconsistency_index(&answers, &FULL_PAIRS);
    assert_eq!(index.sum, 8);
    assert!(index.inconsistent);

    let answers = answers.with_ordinal(question_key(25), 1);
    let index = inconsistency_index(&answers, &FULL_PAIRS);
    assert_eq!(index.sum, 7);
    assert!(!index.inconsistent);
}

#[test]
fn difference_is_symmetric() {
    let forward = AnswerSet::new()
        .with_ordinal(question_key(11), 0)
        .with_ordinal(question_key(49), 3);
    let backward = AnswerSet::new()
        .with_ordinal(question_key(11), 3)
        .with_ordinal(question_key(49), 0);
    assert_eq!(
        inconsistency_index(&forward, &FULL_PAIRS).sum,
        inconsistency_index(&backward, &FULL_PAIRS).sum
    );
}

#[test]
fn short_form_requires_an_informant() {
    let answers = uniform(SHORT_ITEMS, 1);
    let err = CaarsShort.score(&answers, &context()).unwrap_err();
    assert!(matches!(err, InstrumentError::MissingInformant { .. }));

    let ctx = context().with_informant(informant());
    match CaarsShort.score(&answers, &ctx).unwrap() {
        ScoreRecord::CaarsShort(s) => {
            assert_eq!(s.scales.len(), SHORT_SCALES.len());
            assert_eq!(s.scale("E").unwrap().sum, 12);
            assert_eq!(s.inconsistency.pairs.len(), SHORT_PAIRS.len());
        }
        other => panic!("unexpected record: {other:?}"),
    }
}

#[test]
fn short_form_rejects_items_beyond_rating_scale() {
    let answers = uniform(SHORT_ITEMS, 1).with_ordinal(question_key(3), -1);
    let ctx = context().with_informant(informant());
    assert!(matches!(
        CaarsShort.score(&answers, &ctx),
        Err(InstrumentError::InvalidAnswers { .. })
    ));
}
