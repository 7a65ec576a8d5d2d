use jiff::civil::date;
use psyscore_core::models::answer::AnswerSet;
use psyscore_core::models::form::FormState;
use psyscore_core::models::patient::{PatientContext, Sex};
use psyscore_instruments::error::InstrumentError;
use psyscore_instruments::instruments::adhd_rs::{likelihood, section_label, AdhdRs};
use psyscore_instruments::record::ScoreRecord;
use psyscore_instruments::scoring::Likelihood;
use psyscore_instruments::{Instrument, ScoringContext};

fn context() -> ScoringContext {
    ScoringContext::new(PatientContext::new(
        "Test Patient",
        Some("15.03.1990".to_string()),
        Sex::Female,
        "",
        date(2026, 10, 17),
    ))
}

fn uniform(rating: i64) -> AnswerSet {
    (1..=18).fold(AnswerSet::new(), |set, s| {
        set.with_ordinal(format!("section_{s}_q1"), rating)
            .with_ordinal(format!("section_{s}_q2"), 0)
    })
}

fn scores(answers: &AnswerSet) -> psyscore_instruments::instruments::adhd_rs::AdhdRsScores {
    match AdhdRs.score(answers, &context()).unwrap() {
        ScoreRecord::AdhdRs(scores) => scores,
        other => panic!("unexpected record: {other:?}"),
    }
}

#[test]
fn all_zero_is_low() {
    let s = scores(&uniform(0));
    assert_eq!(s.overall, 0);
    assert_eq!(s.max_overall, 54);
    assert_eq!(s.likelihood, Likelihood::Low);
}

#[test]
fn all_maximum_is_high() {
    let s = scores(&uniform(3));
    assert_eq!(s.inattention, 27);
    assert_eq!(s.hyperactivity, 27);
    assert_eq!(s.overall, 54);
    assert!((s.percent - 100.0).abs() < f64::EPSILON);
    assert_eq!(s.likelihood, Likelihood::High);
}

#[test]
fn section_scores_its_highest_row() {
    let answers = AnswerSet::new()
        .with_ordinal("section_1_q1", 1)
        .with_ordinal("section_1_q2", 3)
        .with_ordinal("section_1_q3", 2)
        .with_ordinal("section_10_q1", 2);
    let s = scores(&answers);
    assert_eq!(s.section_maxima[0], 3);
    assert_eq!(s.section_maxima[9], 2);
    assert_eq!(s.inattention, 3);
    assert_eq!(s.hyperactivity, 2);
    assert_eq!(section_label(s.section_maxima[0]), "high");
    assert_eq!(section_label(s.section_maxima[1]), "absent");
}

#[test]
fn likelihood_thresholds() {
    assert_eq!(likelihood(21, 54).1, Likelihood::Low);
    assert_eq!(likelihood(22, 54).1, Likelihood::Moderate);
    assert_eq!(likelihood(37, 54).1, Likelihood::Moderate);
    assert_eq!(likelihood(38, 54).1, Likelihood::High);
}

#[test]
fn out_of_range_rating_is_rejected() {
    let answers = uniform(1).with_ordinal("section_4_q1", 4);
    let err = AdhdRs.score(&answers, &context()).unwrap_err();
    match err {
        InstrumentError::InvalidAnswers { errors, .. } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].question_id, "section_4_q1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_answers_are_rejected() {
    let err = AdhdRs.score(&AnswerSet::new(), &context()).unwrap_err();
    assert!(matches!(err, InstrumentError::NoAnswers { .. }));
}

#[test]
fn extraction_reads_only_section_fields() {
    let form = FormState::new()
        .with("section_1_q1", 2i64)
        .with("section_18_q4", "3")
        .with("section_19_q1", 3i64)
        .with("question_1", 3i64)
        .with("patient_name", "Someone");
    let answers = AdhdRs.extract(&form);
    assert_eq!(answers.len(), 2);
    assert_eq!(answers.ordinal("section_18_q4"), Some(3));
}

#[test]
fn scoring_is_repeatable() {
    let answers = uniform(2);
    let first = AdhdRs.score(&answers, &context()).unwrap();
    let second = AdhdRs.score(&answers, &context()).unwrap();
    assert_eq!(first, second);
}
